use crate::{Point3i, PointN};

/// Either the X, Y, or Z axis.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Axis3 {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis3 {
    /// The index for a point's component on this axis.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn get_unit_vector(&self) -> Point3i {
        match self {
            Axis3::X => PointN([1, 0, 0]),
            Axis3::Y => PointN([0, 1, 0]),
            Axis3::Z => PointN([0, 0, 1]),
        }
    }
}

/// One of the six face directions of a cube. Octree nodes store one neighbor link per face, indexed by
/// `SignedAxis3::index`, in the order `+X, -X, +Y, -Y, +Z, -Z`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SignedAxis3 {
    pub sign: i32,
    pub axis: Axis3,
}

impl SignedAxis3 {
    /// All face directions, ordered by `index`.
    pub const ALL: [SignedAxis3; 6] = [
        SignedAxis3 { sign: 1, axis: Axis3::X },
        SignedAxis3 { sign: -1, axis: Axis3::X },
        SignedAxis3 { sign: 1, axis: Axis3::Y },
        SignedAxis3 { sign: -1, axis: Axis3::Y },
        SignedAxis3 { sign: 1, axis: Axis3::Z },
        SignedAxis3 { sign: -1, axis: Axis3::Z },
    ];

    pub fn new(sign: i32, axis: Axis3) -> Self {
        Self { sign, axis }
    }

    /// The slot of this direction in a node's neighbor array.
    pub fn index(&self) -> usize {
        2 * self.axis.index() + (self.sign < 0) as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn opposite(&self) -> Self {
        Self::new(-self.sign, self.axis)
    }

    pub fn get_vector(&self) -> Point3i {
        self.axis.get_unit_vector() * self.sign
    }

    pub fn from_vector(v: Point3i) -> Option<Self> {
        match v {
            PointN([x, 0, 0]) if x != 0 => Some(SignedAxis3::new(x.signum(), Axis3::X)),
            PointN([0, y, 0]) if y != 0 => Some(SignedAxis3::new(y.signum(), Axis3::Y)),
            PointN([0, 0, z]) if z != 0 => Some(SignedAxis3::new(z.signum(), Axis3::Z)),
            _ => None,
        }
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
