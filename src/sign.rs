#[derive(Clone, Copy, Eq, PartialEq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// The 0/1 truth value this sign assigns to a variable.
    #[inline]
    pub fn value(self) -> u8 {
        matches!(self, Sign::Positive) as u8
    }
}

impl From<bool> for Sign {
    #[inline]
    fn from(x: bool) -> Self {
        if x {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", if self == &Sign::Negative { "~" } else { "" })
    }
}

impl std::fmt::Debug for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", if self == &Sign::Positive { "+" } else { "~" })
    }
}
