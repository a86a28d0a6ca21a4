//! Pairing classifier
//!
//! Decides for every BOM row whether it is a standalone component, a component
//! followed by its material row, or a material row owned by the row before it.
//! Only the rows at `i-1`, `i` and `i+1` are ever consulted.

use crate::types::{BomRow, ClassifiedRow, Role};
use tracing::debug;

/// Pairing of one row with a neighbour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pairing {
    Single,
    /// Row owns the material row at `material`
    Paired { material: usize },
    /// Row is the material of the component at `owner`
    Skip { owner: usize },
}

impl Pairing {
    pub fn role(&self) -> Role {
        match self {
            Pairing::Single => Role::Single,
            Pairing::Paired { .. } => Role::Paired,
            Pairing::Skip { .. } => Role::Skip,
        }
    }

    pub fn partner(&self) -> Option<usize> {
        match self {
            Pairing::Single => None,
            Pairing::Paired { material } => Some(*material),
            Pairing::Skip { owner } => Some(*owner),
        }
    }
}

/// Index of the row that forms a component/material pair with row `i`.
///
/// Rules are checked in order and the first match wins:
///
/// 1. level 1 component unit, next is level 2 `kg` → `i+1`
/// 2. level 2 `kg`, previous is level 1 → `i-1`
/// 3. level 2, next is level 3 `kg` → `i+1`
/// 4. level 3 `kg`, previous is level 2 → `i-1`
/// 5. level 3, next is level 4 `kg` → `i+1`
/// 6. level 4 `kg`, previous is level 3 → `i-1`
pub fn match_partner<R: AsRef<BomRow>>(rows: &[R], i: usize) -> Option<usize> {
    let cur: &BomRow = rows.get(i)?.as_ref();
    let prev: Option<&BomRow> = i.checked_sub(1).and_then(|j| rows.get(j)).map(AsRef::as_ref);
    let next: Option<&BomRow> = rows.get(i + 1).map(AsRef::as_ref);

    let next_material_at =
        |level: u32| next.is_some_and(|n| n.level == level && n.unit.is_material());
    let prev_at = |level: u32| prev.is_some_and(|p| p.level == level);

    if cur.level == 1 && cur.unit.is_component() && next_material_at(2) {
        return Some(i + 1);
    }
    if cur.level == 2 && prev_at(1) && cur.unit.is_material() {
        return Some(i - 1);
    }
    if cur.level == 2 && next_material_at(3) {
        return Some(i + 1);
    }
    if cur.level == 3 && prev_at(2) && cur.unit.is_material() {
        return Some(i - 1);
    }
    if cur.level == 3 && next_material_at(4) {
        return Some(i + 1);
    }
    if cur.level == 4 && prev_at(3) && cur.unit.is_material() {
        return Some(i - 1);
    }
    None
}

/// Pairing of row `i` derived from its matched partner
pub fn pairing<R: AsRef<BomRow>>(rows: &[R], i: usize) -> Pairing {
    match match_partner(rows, i) {
        Some(p) if p == i + 1 => Pairing::Paired { material: p },
        Some(p) if p < i => Pairing::Skip { owner: p },
        _ => Pairing::Single,
    }
}

/// Owning component of a material row at `i`, looked up afresh
pub fn owner_of<R: AsRef<BomRow>>(rows: &[R], i: usize) -> Option<usize> {
    match_partner(rows, i).filter(|&p| p < i)
}

/// Classify every row, attaching the already resolved weights.
///
/// Rows carrying a role label keep it; positional partners are still
/// attached so the builder can pair them.
pub fn classify(rows: Vec<BomRow>, weights: &[f64]) -> Vec<ClassifiedRow> {
    let roles: Vec<(Role, Option<usize>)> = (0..rows.len())
        .map(|i| match rows[i].role_label.as_deref() {
            Some(label) => {
                let role = Role::from_label(label);
                let partner = match role {
                    Role::Paired => Some(i + 1),
                    Role::Skip => owner_of(&rows, i),
                    Role::Single | Role::Unrecognized(_) => None,
                };
                (role, partner)
            }
            None => {
                let pairing = pairing(&rows, i);
                debug!(row = i, ?pairing, "classified");
                (pairing.role(), pairing.partner())
            }
        })
        .collect();

    rows.into_iter()
        .zip(roles)
        .enumerate()
        .map(|(i, (row, (role, partner_index)))| ClassifiedRow {
            row,
            weight: weights.get(i).copied().unwrap_or(0.0),
            role,
            partner_index,
        })
        .collect()
}
