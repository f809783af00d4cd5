use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fulfilment_core::{
    BusinessUnitCode, DomainError, DomainResult, Entity, ErrorRule, LocationId, ValueObject,
};

/// A warehouse record.
///
/// Use cases receive and pass warehouses by value; the store owns the persisted
/// state. `archived_at == None` means the warehouse is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub business_unit_code: BusinessUnitCode,
    pub location: LocationId,
    pub capacity: u32,
    pub stock: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

impl Warehouse {
    /// A not-yet-persisted, active warehouse.
    pub fn new(
        business_unit_code: BusinessUnitCode,
        location: LocationId,
        capacity: u32,
        stock: u32,
    ) -> Self {
        Self {
            business_unit_code,
            location,
            capacity,
            stock,
            created_at: None,
            archived_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.archived_at.is_none()
    }

    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    /// Check the record-level invariant `stock <= capacity`.
    pub fn ensure_well_formed(&self) -> DomainResult<()> {
        if self.stock > self.capacity {
            return Err(DomainError::invalid_argument(
                ErrorRule::InvalidField,
                format!(
                    "warehouse {}: stock {} exceeds capacity {}",
                    self.business_unit_code, self.stock, self.capacity
                ),
            ));
        }
        Ok(())
    }
}

impl Entity for Warehouse {
    type Id = BusinessUnitCode;

    fn id(&self) -> &Self::Id {
        &self.business_unit_code
    }
}

/// Reference data for a site warehouses can be placed at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub identification: LocationId,
    /// Maximum number of active warehouses at this location.
    pub max_number_of_warehouses: u32,
    /// Ceiling on warehouse capacity at this location.
    pub max_capacity: u32,
}

impl Location {
    pub fn new(identification: LocationId, max_number_of_warehouses: u32, max_capacity: u32) -> Self {
        Self {
            identification,
            max_number_of_warehouses,
            max_capacity,
        }
    }
}

impl ValueObject for Location {}

/// Loosely-typed warehouse payload as a front end deserializes it.
///
/// Every field is optional so that missing input surfaces as a typed
/// `MissingField` error instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseRequest {
    pub business_unit_code: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<i64>,
    pub stock: Option<i64>,
}

impl WarehouseRequest {
    /// Convert an optional request body into a warehouse candidate.
    pub fn require(body: Option<Self>) -> DomainResult<Warehouse> {
        body.ok_or_else(|| {
            DomainError::invalid_argument(ErrorRule::MissingBody, "warehouse cannot be null")
        })?
        .into_warehouse()
    }

    pub fn into_warehouse(self) -> DomainResult<Warehouse> {
        let code = BusinessUnitCode::parse(required(self.business_unit_code, "businessUnitCode")?)?;
        let location = LocationId::parse(required(self.location, "location")?)?;
        let capacity = non_negative(required(self.capacity, "capacity")?, "capacity")?;
        let stock = non_negative(required(self.stock, "stock")?, "stock")?;

        let warehouse = Warehouse::new(code, location, capacity, stock);
        warehouse.ensure_well_formed()?;
        Ok(warehouse)
    }
}

fn required<T>(value: Option<T>, field: &str) -> DomainResult<T> {
    value.ok_or_else(|| {
        DomainError::invalid_argument(ErrorRule::MissingField, format!("{field} is required"))
    })
}

fn non_negative(value: i64, field: &str) -> DomainResult<u32> {
    u32::try_from(value).map_err(|_| {
        DomainError::invalid_argument(
            ErrorRule::InvalidField,
            format!("{field} must be between 0 and {}, got {value}", u32::MAX),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> WarehouseRequest {
        WarehouseRequest {
            business_unit_code: Some("MWH.012".to_string()),
            location: Some("AMSTERDAM-002".to_string()),
            capacity: Some(50),
            stock: Some(5),
        }
    }

    #[test]
    fn complete_request_converts_to_active_warehouse() {
        let warehouse = request().into_warehouse().unwrap();
        assert_eq!(warehouse.business_unit_code.as_str(), "MWH.012");
        assert_eq!(warehouse.location.as_str(), "AMSTERDAM-002");
        assert_eq!(warehouse.capacity, 50);
        assert_eq!(warehouse.stock, 5);
        assert!(warehouse.is_active());
        assert_eq!(warehouse.created_at, None);
    }

    #[test]
    fn missing_body_is_invalid_argument() {
        let err = WarehouseRequest::require(None).unwrap_err();
        assert!(err.is_rule(ErrorRule::MissingBody));
    }

    #[test]
    fn missing_or_blank_fields_are_rejected() {
        let mut req = request();
        req.capacity = None;
        let err = req.into_warehouse().unwrap_err();
        assert!(err.is_rule(ErrorRule::MissingField));

        let mut req = request();
        req.business_unit_code = Some("  ".to_string());
        let err = req.into_warehouse().unwrap_err();
        assert!(err.is_rule(ErrorRule::MissingField));
    }

    #[test]
    fn negative_numbers_are_rejected() {
        let mut req = request();
        req.stock = Some(-1);
        let err = req.into_warehouse().unwrap_err();
        assert!(err.is_rule(ErrorRule::InvalidField));
    }

    #[test]
    fn stock_above_capacity_is_rejected() {
        let mut req = request();
        req.stock = Some(51);
        let err = req.into_warehouse().unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument { rule: ErrorRule::InvalidField, .. }));
    }

    #[test]
    fn request_uses_camel_case_fields() {
        let req: WarehouseRequest = serde_json::from_str(
            r#"{"businessUnitCode":"MWH.001","location":"ZWOLLE-001","capacity":40,"stock":10}"#,
        )
        .unwrap();
        assert_eq!(req.business_unit_code.as_deref(), Some("MWH.001"));
        assert_eq!(req.capacity, Some(40));
    }

    #[test]
    fn archived_warehouse_is_not_active() {
        let mut warehouse = request().into_warehouse().unwrap();
        warehouse.archived_at = Some(Utc::now());
        assert!(warehouse.is_archived());
        assert!(!warehouse.is_active());
    }

    #[test]
    fn identity_is_the_business_unit_code() {
        let original = request().into_warehouse().unwrap();
        let mut successor = original.clone();
        successor.capacity = 75;
        successor.location = LocationId::parse("AMSTERDAM-001").unwrap();
        assert_eq!(successor.id().as_str(), "MWH.012");
        assert!(original.same_identity(&successor));

        successor.business_unit_code = BusinessUnitCode::parse("MWH.013").unwrap();
        assert!(!original.same_identity(&successor));
    }
}
