//! Endpoint-kind validation for edges (invariant I2): an edge of a given
//! `EdgeKind` may only connect certain `(from_kind, to_kind)` pairs.

use crate::types::{EdgeKind, NodeKind};

/// Returns `true` if `kind` may connect a node of `from` to a node of
/// `to`. `Unparsed` is always an allowed `to` for `Imports`,
/// `Inherits`, and `References` — it is the fallback target of last
/// resort (spec §4.4).
pub fn allowed(kind: EdgeKind, from: NodeKind, to: NodeKind) -> bool {
    use NodeKind::*;

    match kind {
        EdgeKind::Contains => matches!(
            (from, to),
            (Directory, Directory)
                | (Directory, File)
                | (File, Class)
                | (File, Interface)
                | (File, Function)
                | (File, Variable)
                | (File, OtherType)
                | (Class, Function)
                | (Class, Variable)
                | (Interface, Function)
        ),
        EdgeKind::Imports => {
            matches!(from, File)
                && matches!(to, File | Directory | Class | Interface | Function | Variable | OtherType | Unparsed)
        }
        EdgeKind::Inherits => matches!(from, Class) && matches!(to, Class | Unparsed),
        EdgeKind::References => matches!(to, Class | Interface | Function | Variable | OtherType | Unparsed),
    }
}
