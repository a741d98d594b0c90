#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub name: String,
    pub position: [f64; 3],
    pub occupancy: f64,
    pub alt_loc: Option<char>,
}

impl Atom {
    pub fn new(name: impl Into<String>, position: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            position,
            occupancy: 1.0,
            alt_loc: None,
        }
    }

    pub fn with_occupancy(mut self, occupancy: f64) -> Self {
        self.occupancy = occupancy;
        self
    }

    pub fn with_alt_loc(mut self, alt_loc: char) -> Self {
        self.alt_loc = Some(alt_loc);
        self
    }
}
