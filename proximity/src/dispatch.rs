use crate::error::QueryError;
use crate::narrowphase::{self, DistanceFn};
use crate::shapes::ShapeKind;
use once_cell::sync::Lazy;
use std::fmt;

const N: usize = ShapeKind::COUNT;

static GLOBAL: Lazy<DispatchTable> = Lazy::new(DispatchTable::with_defaults);

/// Maps an ordered pair of shape kinds to the routine computing their distance.
#[derive(Clone)]
pub struct DispatchTable {
    routines: [[Option<DistanceFn>; N]; N],
}

impl DispatchTable {
    /// A table with no routines.
    pub fn empty() -> Self {
        DispatchTable {
            routines: [[None; N]; N],
        }
    }

    /// The built-in routines: closed forms for sphere pairs and for convex shapes against
    /// planes and halfspaces, GJK for every other pair of convex shapes.
    pub fn with_defaults() -> Self {
        let mut table = Self::empty();
        for &a in &ShapeKind::CONVEX {
            for &b in &ShapeKind::CONVEX {
                table.register(a, b, narrowphase::convex_convex);
            }
            table.register(a, ShapeKind::Halfspace, narrowphase::convex_halfspace);
            table.register(a, ShapeKind::Plane, narrowphase::convex_plane);
        }
        table.register(ShapeKind::Sphere, ShapeKind::Sphere, narrowphase::sphere_sphere);
        table
    }

    /// The shared default table, built on first use.
    pub fn global() -> &'static DispatchTable {
        &GLOBAL
    }

    pub fn register(&mut self, a: ShapeKind, b: ShapeKind, routine: DistanceFn) {
        self.routines[a.index()][b.index()] = Some(routine);
    }

    /// Registers `routine` for `(a, b)` and `(b, a)`. The routine must not depend on the
    /// order of its arguments.
    pub fn register_symmetric(&mut self, a: ShapeKind, b: ShapeKind, routine: DistanceFn) {
        self.register(a, b, routine);
        self.register(b, a, routine);
    }

    pub fn unregister(&mut self, a: ShapeKind, b: ShapeKind) -> Option<DistanceFn> {
        self.routines[a.index()][b.index()].take()
    }

    #[inline]
    pub fn lookup(&self, a: ShapeKind, b: ShapeKind) -> Option<DistanceFn> {
        self.routines[a.index()][b.index()]
    }

    /// Finds the routine for `(a, b)`, falling back to `(b, a)`. The flag is true when the
    /// routine expects its arguments swapped.
    pub fn resolve(&self, a: ShapeKind, b: ShapeKind) -> Result<(DistanceFn, bool), QueryError> {
        if let Some(routine) = self.lookup(a, b) {
            Ok((routine, false))
        } else if let Some(routine) = self.lookup(b, a) {
            Ok((routine, true))
        } else {
            Err(QueryError::UnsupportedPair {
                first: a,
                second: b,
            })
        }
    }

    pub fn supports(&self, a: ShapeKind, b: ShapeKind) -> bool {
        self.lookup(a, b).is_some() || self.lookup(b, a).is_some()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered = self.routines.iter().flatten().filter(|r| r.is_some()).count();
        f.debug_struct("DispatchTable")
            .field("registered", &registered)
            .finish()
    }
}
