use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{VehicleError, VehicleResult};

pub const VIN_LENGTH: usize = 17;

/// A 17-character Vehicle Identification Number.
///
/// Only `A-Z` and `0-9` are allowed, minus `I`, `O` and `Q`. Input is trimmed
/// and upper-cased before checking, so `" 1hgcm82633a004352 "` parses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vin(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VinError {
    #[error("VIN must be exactly {VIN_LENGTH} characters, got {0}")]
    Length(usize),

    #[error("VIN contains invalid character '{0}'")]
    InvalidCharacter(char),
}

impl Vin {
    pub fn parse(input: &str) -> Result<Self, VinError> {
        let normalized = input.trim().to_ascii_uppercase();

        let len = normalized.chars().count();
        if len != VIN_LENGTH {
            return Err(VinError::Length(len));
        }

        if let Some(bad) = normalized.chars().find(|c| !is_vin_char(*c)) {
            return Err(VinError::InvalidCharacter(bad));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_vin_char(c: char) -> bool {
    matches!(c, 'A'..='H' | 'J'..='N' | 'P' | 'R'..='Z' | '0'..='9')
}

impl FromStr for Vin {
    type Err = VinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One `{Variable, Value}` pair from the decode response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DecodedVariable {
    #[serde(rename = "Variable")]
    pub variable: String,
    #[serde(rename = "Value", default)]
    pub value: Option<String>,
}

impl DecodedVariable {
    pub fn new(variable: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            value: Some(value.into()),
        }
    }
}

/// vPIC variable names read from a decode.
pub mod variables {
    pub const MAKE: &str = "Make";
    pub const MODEL: &str = "Model";
    pub const MODEL_YEAR: &str = "Model Year";
    pub const BODY_CLASS: &str = "Body Class";
    pub const ENGINE_CYLINDERS: &str = "Engine Number of Cylinders";
    pub const DISPLACEMENT_L: &str = "Displacement (L)";
    pub const FUEL_TYPE: &str = "Fuel Type - Primary";
    pub const PLANT_CITY: &str = "Plant City";
    pub const PLANT_COUNTRY: &str = "Plant Country";
}

/// Value of `name` in `vars`, or `""` when absent or null.
pub fn variable_value(vars: &[DecodedVariable], name: &str) -> String {
    vars.iter()
        .find(|v| v.variable == name)
        .and_then(|v| v.value.as_deref())
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInfo {
    pub make: String,
    pub model: String,
    pub model_year: String,
    pub body_class: String,
    pub engine_cylinders: String,
    pub displacement: String,
    pub fuel_type: String,
    pub plant_city: String,
    pub plant_country: String,
}

impl VehicleInfo {
    /// Build from a decode.
    ///
    /// No `Make` means the VIN is unknown to the provider. A `Make` without
    /// `Model` or `Model Year` is not enough to look up recalls.
    pub fn from_variables(vin: &Vin, vars: &[DecodedVariable]) -> VehicleResult<Self> {
        use variables::*;

        let info = Self {
            make: variable_value(vars, MAKE),
            model: variable_value(vars, MODEL),
            model_year: variable_value(vars, MODEL_YEAR),
            body_class: variable_value(vars, BODY_CLASS),
            engine_cylinders: variable_value(vars, ENGINE_CYLINDERS),
            displacement: variable_value(vars, DISPLACEMENT_L),
            fuel_type: variable_value(vars, FUEL_TYPE),
            plant_city: variable_value(vars, PLANT_CITY),
            plant_country: variable_value(vars, PLANT_COUNTRY),
        };

        if info.make.is_empty() {
            return Err(VehicleError::NotFound(vin.to_string()));
        }

        let missing: Vec<&'static str> = [(MODEL, &info.model), (MODEL_YEAR, &info.model_year)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect();

        if !missing.is_empty() {
            return Err(VehicleError::IncompleteData(missing));
        }

        Ok(info)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecallRecord {
    pub manufacturer: String,
    pub campaign_number: String,
    pub report_date: String,
    pub component: String,
    pub summary: String,
}

impl RecallRecord {
    pub fn is_empty(&self) -> bool {
        self.manufacturer.is_empty()
            && self.campaign_number.is_empty()
            && self.report_date.is_empty()
            && self.component.is_empty()
            && self.summary.is_empty()
    }
}

/// Whether recalls were actually checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecallOutcome {
    Fetched(Vec<RecallRecord>),
    Unavailable { reason: String },
}

/// Response body of a lookup.
///
/// `recalls` is empty both when the vehicle has none and when the recall
/// service failed; `recalls_available` tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub vehicle_info: VehicleInfo,
    pub recalls: Vec<RecallRecord>,
    pub recalls_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recall_error: Option<String>,
}

impl LookupResult {
    pub fn new(vehicle_info: VehicleInfo, outcome: RecallOutcome) -> Self {
        match outcome {
            RecallOutcome::Fetched(recalls) => Self {
                vehicle_info,
                recalls,
                recalls_available: true,
                recall_error: None,
            },
            RecallOutcome::Unavailable { reason } => Self {
                vehicle_info,
                recalls: Vec::new(),
                recalls_available: false,
                recall_error: Some(reason),
            },
        }
    }
}

/// Request body for `POST /vehicles/lookup`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct VehicleLookup {
    #[validate(length(min = 1, max = 64))]
    #[schema(example = "1HGCM82633A004352")]
    pub vin: String,
}
