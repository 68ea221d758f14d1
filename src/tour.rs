//! Walk-through of the list cursor and the ownership cell, driven by a
//! [`TourConfig`]. The binary prints the rendered report; tests inspect it.

use colored::Colorize;
use log::info;

use crate::config::TourConfig;
use crate::error::Result;
use crate::node_list::LinkedList;
use crate::ownership_cell::OwnershipCell;

/// Validity of a named cell binding at one step of the tour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityCheck {
    pub step: &'static str,
    pub binding: &'static str,
    pub valid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourReport {
    pub range_values: Vec<i32>,
    pub cursor_values: Vec<i32>,
    pub first: Option<i32>,
    pub advance_by: usize,
    pub advanced: Option<i32>,
    pub checks: Vec<ValidityCheck>,
    pub final_age: u32,
    pub final_tags: Vec<String>,
    pub owned_handoff: Vec<i32>,
    pub borrowed_handoff: Vec<i32>,
}

pub fn run(config: &TourConfig) -> Result<TourReport> {
    config.validate()?;

    let mut list = LinkedList::new();
    for &value in &config.list.values {
        list.try_insert_at_head(value)?;
    }
    info!("built list of {} values", list.len());

    let range_values: Vec<i32> = (&list).into_iter().collect();

    let mut cursor_values = Vec::with_capacity(list.len());
    let mut cursor = list.start();
    while cursor.not_equal(&list.end()) {
        cursor_values.push(cursor.dereference());
        cursor.advance_one();
    }

    let first = list.start().value();
    let advanced = if list.is_empty() {
        None
    } else {
        Some(list.start().advance_by(config.list.advance_by).dereference())
    };

    let mut checks = Vec::new();
    let mut a = OwnershipCell::new(config.cell.age, config.cell.tags.clone());
    checks.push(check("after construction", "a", &a));

    let mut b = OwnershipCell::default();
    b.assign_from(&mut a);
    checks.push(check("after assigning a into b", "b", &b));
    checks.push(check("after assigning a into b", "a", &a));

    let c = OwnershipCell::transfer_from(&mut b);
    checks.push(check("after constructing c from b", "c", &c));
    checks.push(check("after constructing c from b", "b", &b));

    let owned_handoff = append_three_owned(vec![1, 2, 3, 4]);
    let mut borrowed_handoff = vec![1, 2, 3, 4];
    append_three_borrowed(&mut borrowed_handoff);

    let (final_age, final_tags) = c.into_parts();

    Ok(TourReport {
        range_values,
        cursor_values,
        first,
        advance_by: config.list.advance_by,
        advanced,
        checks,
        final_age,
        final_tags,
        owned_handoff,
        borrowed_handoff,
    })
}

fn check(step: &'static str, binding: &'static str, cell: &OwnershipCell) -> ValidityCheck {
    ValidityCheck {
        step,
        binding,
        valid: cell.is_valid(),
    }
}

/// Seizes `values`; the caller has nothing left to touch afterwards.
pub fn append_three_owned(mut values: Vec<i32>) -> Vec<i32> {
    values.push(3);
    values
}

/// Works through a borrow; the caller keeps ownership and sees the change.
pub fn append_three_borrowed(values: &mut Vec<i32>) {
    values.push(3);
}

impl TourReport {
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("{}\n", "== Linked list ==".bold()));
        out.push_str(&format!("range-style loop: {}\n", join(&self.range_values)));
        out.push_str(&format!("cursor loop:      {}\n", join(&self.cursor_values)));
        match (self.first, self.advanced) {
            (Some(first), Some(advanced)) => {
                out.push_str(&format!("first element:    {}\n", first));
                out.push_str(&format!(
                    "after advance_by({}): {}\n",
                    self.advance_by, advanced
                ));
            }
            _ => out.push_str(&format!("{}\n", "list is empty".yellow())),
        }

        out.push_str(&format!("\n{}\n", "== Ownership cell ==".bold()));
        for check in &self.checks {
            let label = if check.valid {
                "valid".green()
            } else {
                "invalid".red()
            };
            out.push_str(&format!("{:<30} {}: {}\n", check.step, check.binding, label));
        }
        out.push_str(&format!(
            "c holds age {} with tags [{}]\n",
            self.final_age,
            self.final_tags.join(", ")
        ));

        out.push_str(&format!("\n{}\n", "== Hand-off ==".bold()));
        out.push_str(&format!("owned:    {}\n", join(&self.owned_handoff)));
        out.push_str(&format!("borrowed: {}\n", join(&self.borrowed_handoff)));

        out
    }
}

fn join(values: &[i32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
