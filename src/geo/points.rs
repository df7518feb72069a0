use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

use nalgebra::Point2;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::Contour;

/// A point sequence in its serialized form: `"x,y x,y ..."`, the layout of
/// an svg `points` attribute. The geometry code never handles the string,
/// it is only produced and parsed at the export boundary.
#[derive(Debug,Clone,PartialEq,Default)]
pub struct PointSeq(pub Vec<Point2<f32>>);

#[derive(Debug, Error, PartialEq)]
pub enum ParsePointsError {
    #[error("point {index} \"{token}\" is not an x,y pair")]
    MissingComma{index:usize,token:String},
    #[error("point {index} \"{token}\" has an invalid coordinate: {source}")]
    InvalidNumber{index:usize,token:String,source:ParseFloatError},
}

impl fmt::Display for PointSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i,p) in self.0.iter().enumerate() {
            if i > 0 { write!(f," ")? }
            write!(f,"{},{}",p.x,p.y)?;
        }
        Ok(())
    }
}

impl FromStr for PointSeq {
    type Err = ParsePointsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .enumerate()
            .map(|(index,token)|{
                let (x,y) = token.split_once(',')
                    .ok_or_else(|| ParsePointsError::MissingComma{index,token:token.into()})?;
                let parse = |v:&str| v.parse::<f32>()
                    .map_err(|source| ParsePointsError::InvalidNumber{index,token:token.into(),source});
                Ok(Point2::new(parse(x)?,parse(y)?))
            })
            .collect::<Result<Vec<_>,_>>()
            .map(PointSeq)
    }
}

impl From<&Contour> for PointSeq {
    fn from(contour:&Contour) -> Self {
        Self(contour.points.clone())
    }
}
impl From<PointSeq> for Contour {
    fn from(seq:PointSeq) -> Self {
        Contour::from(seq.0)
    }
}

impl Serialize for PointSeq {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
impl<'de> Deserialize<'de> for PointSeq {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
