use crate::domain::{
    errors::DomainError,
    models::OutboundRequest,
    value_objects::{Location, PhoneNumber},
};

/// Result of one validation stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<T> {
    Ok(T),
    /// Usable value, but something was dropped on the way.
    Degraded { value: T, reason: String },
    Rejected(DomainError),
}

impl<T> Step<T> {
    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Step::Degraded {
            value,
            reason: reason.into(),
        }
    }

    /// Splits into the carried value and the degradation reason, if any.
    pub fn into_result(self) -> Result<(T, Option<String>), DomainError> {
        match self {
            Step::Ok(value) => Ok((value, None)),
            Step::Degraded { value, reason } => Ok((value, Some(reason))),
            Step::Rejected(err) => Err(err),
        }
    }
}

pub fn validate_phone(raw: Option<&str>) -> Step<PhoneNumber> {
    match raw.filter(|p| !p.is_empty()) {
        None => Step::Rejected(DomainError::MissingPhone),
        Some(raw) => match PhoneNumber::parse(raw) {
            Ok(phone) => Step::Ok(phone),
            Err(err) => Step::Rejected(err),
        },
    }
}

/// Both coordinates must be present and numeric; anything less skips the
/// location without failing the request.
pub fn parse_location(request: &OutboundRequest) -> Step<Option<Location>> {
    let latitude = request.latitude.as_deref().filter(|v| !v.is_empty());
    let longitude = request.longitude.as_deref().filter(|v| !v.is_empty());

    match (latitude, longitude) {
        (None, None) => Step::Ok(None),
        (Some(lat), Some(lng)) => match Location::parse(lat, lng, request.address.as_deref()) {
            Ok(location) => Step::Ok(Some(location)),
            Err(err) => Step::degraded(None, err.to_string()),
        },
        _ => Step::degraded(None, "latitude and longitude must both be provided"),
    }
}
