use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct Settings{
    /// [mm] Thickness of the sheet material, which is also the distance
    /// between two cutting planes. The first plane sits half a thickness
    /// above the bottom of the mesh.
    pub thickness: f32,

    /// [mm] Two segment endpoints closer than this (in both x and y) are
    /// joined when the slice segments are chained into loops.
    pub max_err: f32,

    /// [mm] A vertex closer than this to the cutting plane counts as lying
    /// on it. Zero means exact comparison.
    pub plane_epsilon: f32,

    /// [mm²] Contour points spanning a smaller triangle with their
    /// neighbours are removed, contours with less area are dropped.
    pub min_area: f32,

    /// [mm] Radius of the alignment marker
    pub marker_radius: f32,

    /// Compute the footprints of each layer on the layer below
    pub traces: bool,

    /// Include the mark areas in the exported document
    pub mark_areas: bool,

    /// Search for marker positions (requires traces)
    pub markers: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            thickness: 3.3, // 1/8" plywood
            max_err: 1e-4,
            plane_epsilon: 0.0,
            min_area: 1e-6,
            marker_radius: 1.0,
            traces: true,
            mark_areas: false,
            markers: true,
        }
    }
}

/// A settings value the slicer cannot work with.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SettingsError {
    #[error("{field} must be a positive number, got {value}")]
    NotPositive{field:&'static str,value:f32},
    #[error("{field} must be a finite number >= 0, got {value}")]
    Negative{field:&'static str,value:f32},
}

impl Settings {
    /// Reads settings from a json file, missing fields keep their default value.
    pub fn from_file<T:AsRef<Path>>(path:T) -> Result<Self,Error> {
        let reader = BufReader::new(File::open(path)?);
        let settings:Self = serde_json::from_reader(reader)?;
        settings.validate()?;
        Ok(settings)
    }
    /// Checks the lengths the algorithms divide by or step with.
    pub fn validate(&self) -> Result<(),SettingsError> {
        let positive = [
            ("thickness", self.thickness),
            ("max_err", self.max_err),
            ("marker_radius", self.marker_radius),
        ];
        for (field,value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::NotPositive{field,value})
            }
        }
        let non_negative = [
            ("plane_epsilon", self.plane_epsilon),
            ("min_area", self.min_area),
        ];
        for (field,value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::Negative{field,value})
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_settings_are_valid_test(){
        assert_eq!(Settings::default().validate(),Ok(()));
    }
    #[test]
    fn invalid_marker_radius_test(){
        for value in [0.0,-1.0,f32::INFINITY] {
            let s = Settings{ marker_radius:value, ..Default::default() };
            assert_eq!(s.validate(),Err(SettingsError::NotPositive{field:"marker_radius",value}));
        }
        let s = Settings{ marker_radius:f32::NAN, ..Default::default() };
        assert!(matches!(s.validate(),Err(SettingsError::NotPositive{field:"marker_radius",..})));
    }
    #[test]
    fn invalid_max_err_test(){
        let s = Settings{ max_err:0.0, ..Default::default() };
        assert_eq!(s.validate(),Err(SettingsError::NotPositive{field:"max_err",value:0.0}));
    }
    #[test]
    fn negative_epsilon_test(){
        let s = Settings{ plane_epsilon:-1e-3, ..Default::default() };
        assert_eq!(s.validate(),Err(SettingsError::Negative{field:"plane_epsilon",value:-1e-3}));
    }
    #[test]
    fn from_file_rejects_zero_radius_test(){
        let path = std::env::temp_dir().join(format!("layer_stack_settings_{}.json",std::process::id()));
        std::fs::write(&path, r#"{ "marker_radius": 0.0 }"#).unwrap();
        let result = Settings::from_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result,Err(Error::Settings(SettingsError::NotPositive{field:"marker_radius",..}))));
    }
    #[test]
    fn from_file_keeps_defaults_test(){
        let path = std::env::temp_dir().join(format!("layer_stack_partial_{}.json",std::process::id()));
        std::fs::write(&path, r#"{ "thickness": 4.0 }"#).unwrap();
        let result = Settings::from_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(result.unwrap(),Settings{ thickness:4.0, ..Default::default() });
    }
}
