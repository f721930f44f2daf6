// Validation of the availability query parameters.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;

const REQUIRED: &str = "This field is required.";
const INVALID_NUMBER: &str = "A valid number is required.";
const NEGATIVE_NUMBER: &str = "Ensure this value is greater than or equal to 0.";
const INVALID_DATE: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
const REVERSED_RANGE: &str = "Ensure this date is not before check_in.";

/// Raw query string parameters, as they arrive over HTTP.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityParams {
    pub max_price: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
}

/// Field-keyed validation failures. Every offending field is listed, each
/// with one or more messages.
#[derive(Error, Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
#[error("invalid parameters: {}", join_fields(.0))]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

fn join_fields(errors: &BTreeMap<String, Vec<String>>) -> String {
    errors.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// A validated availability request. Construction goes through
/// [`AvailabilityQuery::new`] or [`AvailabilityParams::validate`], so every
/// instance has a non-negative price and `check_in <= check_out`.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityQuery {
    max_price: Decimal,
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl AvailabilityQuery {
    pub fn new(
        max_price: Decimal,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if max_price < Decimal::ZERO {
            errors.add("max_price", NEGATIVE_NUMBER);
        }
        if check_out < check_in {
            errors.add("check_out", REVERSED_RANGE);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            max_price,
            check_in,
            check_out,
        })
    }

    pub fn max_price(&self) -> Decimal {
        self.max_price
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }
}

impl AvailabilityParams {
    /// Builds the parameters from raw query pairs. A repeated key keeps its
    /// last value; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "max_price" => params.max_price = Some(value),
                "check_in" => params.check_in = Some(value),
                "check_out" => params.check_out = Some(value),
                _ => {}
            }
        }
        params
    }

    pub fn validate(&self) -> Result<AvailabilityQuery, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let max_price = parse_field(&mut errors, "max_price", &self.max_price, parse_price);
        let check_in = parse_field(&mut errors, "check_in", &self.check_in, parse_date);
        let check_out = parse_field(&mut errors, "check_out", &self.check_out, parse_date);

        match (max_price, check_in, check_out) {
            (Some(max_price), Some(check_in), Some(check_out)) if errors.is_empty() => {
                AvailabilityQuery::new(max_price, check_in, check_out)
            }
            _ => Err(errors),
        }
    }
}

fn parse_field<T>(
    errors: &mut ValidationErrors,
    field: &str,
    raw: &Option<String>,
    parse: fn(&str) -> Result<T, &'static str>,
) -> Option<T> {
    let raw = match raw.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => {
            errors.add(field, REQUIRED);
            return None;
        }
    };

    match parse(raw) {
        Ok(value) => Some(value),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}

fn parse_price(raw: &str) -> Result<Decimal, &'static str> {
    let price = match Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        Ok(price) => price,
        // Finite numbers outside the decimal range saturate.
        Err(_) => match raw.parse::<f64>() {
            Ok(value) if !value.is_finite() => return Err(INVALID_NUMBER),
            Ok(value) if value < 0.0 => return Err(NEGATIVE_NUMBER),
            Ok(value) if value >= 1.0 => Decimal::MAX,
            Ok(_) => Decimal::ZERO,
            Err(_) => return Err(INVALID_NUMBER),
        },
    };
    if price < Decimal::ZERO {
        return Err(NEGATIVE_NUMBER);
    }
    Ok(price)
}

fn parse_date(raw: &str) -> Result<NaiveDate, &'static str> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| INVALID_DATE)
}
