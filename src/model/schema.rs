//! Destination placement rules.
//!
//! These predicates back the safe-insert contract: an insertion that would
//! violate them is rejected (signalled, not panicked), and the offending
//! handler aborts that single node's conversion.

use super::node::Role;

/// Check whether `child` may be placed directly inside `parent`.
pub fn allows(parent: Role, child: Role) -> bool {
    use Role::*;
    match parent {
        // Rows go in tables; a trailing caption is also table content.
        Table => matches!(child, TableRow | Caption),
        TableRow => matches!(child, TableCell),
        // Cells hold block content, plus the inline/marker content that the
        // cell content repair re-hosts into a paragraph when it arrives bare.
        TableCell => matches!(child, Paragraph | Table | Container | Text | Inline | Marker | Break),
        Caption => matches!(child, Text | Inline | Marker | Break),
        Paragraph => matches!(child, Text | Inline | Marker | Break),
        Inline => matches!(child, Text | Inline | Marker | Break),
        Container => matches!(child, Paragraph | Table | Container | Text | Inline | Marker | Break),
        Root => matches!(child, Paragraph | Table | Container),
        // Leaves
        Text | Marker | Break => false,
    }
}

/// Check if a role is a structural container where inter-element whitespace
/// is irrelevant. Whitespace between their children is formatting noise
/// (indentation, newlines), not content.
pub fn is_structural_container(role: Role) -> bool {
    matches!(
        role,
        Role::Root | Role::Container | Role::Table | Role::TableRow | Role::TableCell
    )
}

/// Check if a role is a block-level element.
pub fn is_block(role: Role) -> bool {
    matches!(
        role,
        Role::Paragraph | Role::Table | Role::Container
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use Role::*;

    #[test]
    fn test_table_placement() {
        assert!(allows(Root, Table));
        assert!(allows(Table, TableRow));
        assert!(allows(Table, Caption));
        assert!(allows(TableRow, TableCell));
        assert!(allows(TableCell, Paragraph));

        assert!(!allows(Table, TableCell));
        assert!(!allows(Table, Paragraph));
        assert!(!allows(Root, TableRow));
        assert!(!allows(TableRow, Paragraph));
    }

    #[test]
    fn test_text_placement() {
        assert!(allows(Paragraph, Text));
        assert!(allows(TableCell, Text));
        assert!(allows(Caption, Text));
        assert!(!allows(Table, Text));
        assert!(!allows(TableRow, Text));
        assert!(!allows(Root, Text));
    }

    #[test]
    fn test_leaves_hold_nothing() {
        for leaf in [Text, Marker, Break] {
            assert!(!allows(leaf, Text));
            assert!(!allows(leaf, Paragraph));
        }
    }
}
