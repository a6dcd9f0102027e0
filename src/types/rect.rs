use crate::error::Result;
use crate::serial::{Deserializer, Serializable, Serializer};
use std::io::{Read, Write};

/// Integer image coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ICoord {
    pub x: i16,
    pub y: i16,
}

impl ICoord {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

impl Serializable for ICoord {
    fn serialize<W: Write>(&self, out: &mut Serializer<W>) -> Result<()> {
        out.write(self.x)?;
        out.write(self.y)
    }

    fn deserialize<R: Read>(input: &mut Deserializer<R>) -> Result<Self> {
        let x = input.read()?;
        let y = input.read()?;
        Ok(Self { x, y })
    }
}

/// Axis-aligned rectangle with inclusive integer corners.
///
/// Always normalized: `bot_left.x <= top_right.x` and
/// `bot_left.y <= top_right.y`. A single point is a valid rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    bot_left: ICoord,
    top_right: ICoord,
}

impl Rect {
    /// Rectangle spanning two opposite corners, in either order
    pub fn new(a: ICoord, b: ICoord) -> Self {
        Self {
            bot_left: ICoord::new(a.x.min(b.x), a.y.min(b.y)),
            top_right: ICoord::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn from_coords(left: i16, bottom: i16, right: i16, top: i16) -> Self {
        Self::new(ICoord::new(left, bottom), ICoord::new(right, top))
    }

    pub fn left(&self) -> i16 {
        self.bot_left.x
    }

    pub fn bottom(&self) -> i16 {
        self.bot_left.y
    }

    pub fn right(&self) -> i16 {
        self.top_right.x
    }

    pub fn top(&self) -> i16 {
        self.top_right.y
    }

    pub fn bot_left(&self) -> ICoord {
        self.bot_left
    }

    pub fn top_right(&self) -> ICoord {
        self.top_right
    }

    pub fn width(&self) -> i32 {
        i32::from(self.right()) - i32::from(self.left())
    }

    pub fn height(&self) -> i32 {
        i32::from(self.top()) - i32::from(self.bottom())
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width()) * i64::from(self.height())
    }

    pub fn contains_point(&self, pt: ICoord) -> bool {
        (self.left()..=self.right()).contains(&pt.x) && (self.bottom()..=self.top()).contains(&pt.y)
    }

    pub fn contains(&self, other: &Rect) -> bool {
        self.contains_point(other.bot_left) && self.contains_point(other.top_right)
    }

    /// Whether the two rectangles share at least one point
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.bottom() <= other.top()
            && other.bottom() <= self.top()
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Rect::from_coords(
            self.left().max(other.left()),
            self.bottom().max(other.bottom()),
            self.right().min(other.right()),
            self.top().min(other.top()),
        ))
    }

    /// Smallest rectangle containing both
    pub fn bounding_union(&self, other: &Rect) -> Rect {
        Rect::from_coords(
            self.left().min(other.left()),
            self.bottom().min(other.bottom()),
            self.right().max(other.right()),
            self.top().max(other.top()),
        )
    }

    /// Shift by `offset`, saturating at the coordinate limits
    pub fn translate(&mut self, offset: ICoord) {
        self.bot_left.x = self.bot_left.x.saturating_add(offset.x);
        self.bot_left.y = self.bot_left.y.saturating_add(offset.y);
        self.top_right.x = self.top_right.x.saturating_add(offset.x);
        self.top_right.y = self.top_right.y.saturating_add(offset.y);
    }
}

/// Bottom-left corner then top-right corner.
impl Serializable for Rect {
    fn serialize<W: Write>(&self, out: &mut Serializer<W>) -> Result<()> {
        out.write_object(&self.bot_left)?;
        out.write_object(&self.top_right)
    }

    fn deserialize<R: Read>(input: &mut Deserializer<R>) -> Result<Self> {
        let a: ICoord = input.read_object()?;
        let b: ICoord = input.read_object()?;
        Ok(Self::new(a, b))
    }
}
