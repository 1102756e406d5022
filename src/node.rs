use crate::math::Point2d;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the guide curve a joint is offset to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Gets the other side.
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    fn prefix(self) -> char {
        match self {
            Side::Left => 'L',
            Side::Right => 'R',
        }
    }
}

/// Identifies a joint by its side and level.
///
/// Identifiers stay valid across rebuilds as long as the number of segments is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointId {
    pub side: Side,
    pub level: usize,
}

impl JointId {
    pub const fn new(side: Side, level: usize) -> Self {
        Self { side, level }
    }

    pub const fn left(level: usize) -> Self {
        Self::new(Side::Left, level)
    }

    pub const fn right(level: usize) -> Self {
        Self::new(Side::Right, level)
    }

    /// The position of this joint in a mechanism's joint list.
    pub(crate) fn index(self) -> usize {
        2 * self.level + (self.side == Side::Right) as usize
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.side.prefix(), self.level)
    }
}

/// An endpoint of a rod, offset to one side of the guide curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Joint {
    pub id: JointId,
    pub pos: Point2d,
}

impl Joint {
    pub fn side(&self) -> Side {
        self.id.side
    }

    pub fn level(&self) -> usize {
        self.id.level
    }
}

/// Which of the two crossing rods of a segment a link is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LinkKind {
    /// Runs from the left joint of a level to the right joint of the next.
    A,
    /// Runs from the right joint of a level to the left joint of the next.
    B,
}

/// A rigid rod connecting joints on adjacent levels and opposite sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Link {
    pub start: JointId,
    pub end: JointId,
    pub kind: LinkKind,
}

impl Link {
    /// Creates the link of the given kind crossing the segment above `level`.
    pub fn crossing(level: usize, kind: LinkKind) -> Self {
        let side = match kind {
            LinkKind::A => Side::Left,
            LinkKind::B => Side::Right,
        };
        Self {
            start: JointId::new(side, level),
            end: JointId::new(side.opposite(), level + 1),
            kind,
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// The point where the two rods of a segment cross.
///
/// Pivots are derived from the joints and own none of them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pivot {
    pub segment: usize,
    pub pos: Point2d,
    /// The two links that cross at this pivot.
    pub links: [Link; 2],
}

impl Pivot {
    pub fn id(&self) -> NodeId {
        NodeId::Pivot(self.segment)
    }
}

/// Identifies either a joint or a pivot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeId {
    Joint(JointId),
    /// The pivot of the segment with the given index.
    Pivot(usize),
}

impl From<JointId> for NodeId {
    fn from(id: JointId) -> Self {
        NodeId::Joint(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Joint(id) => write!(f, "{}", id),
            NodeId::Pivot(segment) => write!(f, "P{}", segment),
        }
    }
}

/// An error produced when parsing a textual node identifier such as `"L2"` or `"P0"`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseNodeIdError {
    #[error("node id is empty")]
    Empty,
    #[error("unknown node prefix {0:?}, expected 'L', 'R' or 'P'")]
    UnknownPrefix(char),
    #[error("invalid node index {0:?}")]
    InvalidIndex(String),
}

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let prefix = chars.next().ok_or(ParseNodeIdError::Empty)?;
        let rest = chars.as_str();
        let index = rest
            .parse::<usize>()
            .map_err(|_| ParseNodeIdError::InvalidIndex(rest.to_owned()))?;
        match prefix {
            'L' => Ok(NodeId::Joint(JointId::left(index))),
            'R' => Ok(NodeId::Joint(JointId::right(index))),
            'P' => Ok(NodeId::Pivot(index)),
            other => Err(ParseNodeIdError::UnknownPrefix(other)),
        }
    }
}

impl FromStr for JointId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<NodeId>()? {
            NodeId::Joint(id) => Ok(id),
            NodeId::Pivot(_) => Err(ParseNodeIdError::UnknownPrefix('P')),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn joint_ids() {
        assert_eq!(JointId::left(2).to_string(), "L2");
        assert_eq!(JointId::right(0).to_string(), "R0");
        assert_eq!(JointId::left(3).index(), 6);
        assert_eq!(JointId::right(3).index(), 7);
        assert_eq!("R12".parse::<JointId>(), Ok(JointId::right(12)));
        assert!("P1".parse::<JointId>().is_err());
    }

    #[test]
    fn node_ids() {
        assert_eq!(NodeId::Pivot(4).to_string(), "P4");
        assert_eq!("P4".parse::<NodeId>(), Ok(NodeId::Pivot(4)));
        assert_eq!("L0".parse::<NodeId>(), Ok(NodeId::Joint(JointId::left(0))));
        assert_eq!("".parse::<NodeId>(), Err(ParseNodeIdError::Empty));
        assert_eq!("X1".parse::<NodeId>(), Err(ParseNodeIdError::UnknownPrefix('X')));
        assert_eq!(
            "Lx".parse::<NodeId>(),
            Err(ParseNodeIdError::InvalidIndex("x".into()))
        );
    }

    #[test]
    fn crossing_links() {
        let a = Link::crossing(1, LinkKind::A);
        let b = Link::crossing(1, LinkKind::B);
        assert_eq!(a.to_string(), "L1-R2");
        assert_eq!(b.to_string(), "R1-L2");
        for link in [a, b] {
            assert_eq!(link.end.level, link.start.level + 1);
            assert_ne!(link.start.side, link.end.side);
        }
    }
}
