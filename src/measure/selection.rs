use super::Point3;
use serde::{Deserialize, Serialize};

/// Semantic type of a scene object as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Zero-geometry point marker. The only kind that can be measured.
    Empty,
    Mesh,
    Curve,
    Camera,
    Light,
    Other,
}

/// Anything the host can put in its selection.
pub trait Selectable {
    fn kind(&self) -> ObjectKind;
    fn name(&self) -> &str;
    fn position(&self) -> Point3;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    pub position: Point3,
}

impl Marker {
    pub fn new(name: impl Into<String>, position: Point3) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    fn from_selectable<S: Selectable + ?Sized>(object: &S) -> Self {
        Self::new(object.name(), object.position())
    }
}

impl Selectable for Marker {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Empty
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> Point3 {
        self.position
    }
}

/// Two or three markers in the order the host selected them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkerSet {
    Pair([Marker; 2]),
    Triangle([Marker; 3]),
}

impl MarkerSet {
    pub fn len(&self) -> usize {
        match self {
            MarkerSet::Pair(_) => 2,
            MarkerSet::Triangle(_) => 3,
        }
    }

    pub fn markers(&self) -> &[Marker] {
        match self {
            MarkerSet::Pair(markers) => markers,
            MarkerSet::Triangle(markers) => markers,
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.markers()
            .iter()
            .map(|marker| marker.name.as_str())
            .collect()
    }
}

/// Filters `selection` down to point markers and accepts exactly two or three
/// of them. Any other count means there is nothing to measure.
pub fn resolve<'a, S, I>(selection: I) -> Option<MarkerSet>
where
    S: Selectable + ?Sized + 'a,
    I: IntoIterator<Item = &'a S>,
{
    let mut markers: Vec<Marker> = selection
        .into_iter()
        .filter(|object| object.kind() == ObjectKind::Empty)
        .map(Marker::from_selectable)
        .collect();

    match markers.len() {
        2 => {
            let second = markers.pop()?;
            let first = markers.pop()?;
            Some(MarkerSet::Pair([first, second]))
        }
        3 => {
            let third = markers.pop()?;
            let second = markers.pop()?;
            let first = markers.pop()?;
            Some(MarkerSet::Triangle([first, second, third]))
        }
        count => {
            log::debug!("[selection] {count} markers selected; nothing to measure");
            None
        }
    }
}
