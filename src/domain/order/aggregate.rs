use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::OrderError;
use super::schema;
use super::status::OrderStatus;
use super::value_objects::{CustomerId, Money, OrderId, OrderItem};

// ============================================================================
// Order Aggregate
// ============================================================================
//
// Unit of consistency: every construction and transition builds a complete
// candidate and runs `validate` on the whole thing before handing it out.
// Fields are private so the total can only ever be the derived one, and
// deserializing goes through the same check.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "OrderRecord")]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    items: Vec<OrderItem>,
    status: OrderStatus,
    total_amount: Money,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Wire shape of `Order`, before validation
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderRecord {
    id: OrderId,
    customer_id: CustomerId,
    items: Vec<OrderItem>,
    status: OrderStatus,
    total_amount: Money,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRecord> for Order {
    type Error = OrderError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        Self {
            id: record.id,
            customer_id: record.customer_id,
            items: record.items,
            status: record.status,
            total_amount: record.total_amount,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
        .validated()
    }
}

impl Order {
    /// Assembles a draft candidate. Not validated; see `validate`.
    pub(crate) fn candidate(
        id: OrderId,
        customer_id: CustomerId,
        items: Vec<OrderItem>,
        status: OrderStatus,
        total_amount: Money,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_id,
            items,
            status,
            total_amount,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy of this order with a new status and `updated_at`. Not validated.
    pub(crate) fn with_status(&self, status: OrderStatus, now: DateTime<Utc>) -> Self {
        Self {
            status,
            updated_at: now,
            ..self.clone()
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn status(&self) -> &OrderStatus {
        &self.status
    }

    pub fn total_amount(&self) -> &Money {
        &self.total_amount
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn can_be_cancelled(&self) -> bool {
        self.status.can_be_cancelled()
    }

    /// Whole-aggregate schema check; reports the first violation only.
    ///
    /// Order of checks: items (count, then each item), status, total
    /// amount, timestamps. Ids are well-formed by construction.
    pub fn validate(&self) -> Result<(), OrderError> {
        validate_items(&self.items)?;

        self.status.validate()?;

        self.total_amount.validate()?;
        let expected = calculate_total_amount(&self.items, self.total_amount.currency())?;
        if expected != self.total_amount {
            return Err(OrderError::validation(
                "Total amount must equal the sum of item subtotals",
            ));
        }

        if self.updated_at < self.created_at {
            return Err(OrderError::validation(
                "updatedAt must not be earlier than createdAt",
            ));
        }

        Ok(())
    }

    /// Runs `validate` and hands the order back on success
    pub(crate) fn validated(self) -> Result<Self, OrderError> {
        self.validate()?;
        Ok(self)
    }
}

/// Item count, then each item in order
pub(crate) fn validate_items(items: &[OrderItem]) -> Result<(), OrderError> {
    schema::item_count(items.len())?;
    items.iter().try_for_each(OrderItem::validate)
}

/// Σ quantity × unit price, tagged with the first item's currency.
///
/// Currencies of later items are not compared; a mixed-currency order gets
/// the first item's currency. `fallback_currency` is used only for an empty
/// item list.
pub fn calculate_total_amount(
    items: &[OrderItem],
    fallback_currency: &str,
) -> Result<Money, OrderError> {
    let total = items.iter().try_fold(Decimal::ZERO, |sum, item| {
        item.subtotal().and_then(|subtotal| sum.checked_add(subtotal))
    });
    let total = total.ok_or_else(|| OrderError::validation("Total amount is out of range"))?;

    let currency = items
        .first()
        .map(|item| item.unit_price.currency())
        .unwrap_or(fallback_currency);

    Ok(Money::unchecked(total, currency))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn money(amount: i64, currency: &str) -> Money {
        Money::new(Decimal::from(amount), currency).unwrap()
    }

    fn item(product_id: &str, quantity: u32, unit_price: Money) -> OrderItem {
        OrderItem {
            product_id: product_id.to_string(),
            quantity,
            unit_price,
        }
    }

    fn draft(items: Vec<OrderItem>) -> Order {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let total = calculate_total_amount(&items, "JPY").unwrap();
        Order::candidate(
            OrderId::from_uuid(Uuid::from_u128(7)),
            CustomerId::from_uuid(Uuid::from_u128(42)),
            items,
            OrderStatus::Draft { created_at: now },
            total,
            now,
        )
    }

    #[test]
    fn test_calculate_total_amount() {
        let items = vec![
            item("p1", 2, money(1000, "JPY")),
            item("p2", 1, money(1000, "JPY")),
        ];
        let total = calculate_total_amount(&items, "USD").unwrap();
        assert_eq!(total.amount(), Decimal::from(3000));
        assert_eq!(total.currency(), "JPY");
    }

    #[test]
    fn test_calculate_total_amount_empty_uses_fallback() {
        let total = calculate_total_amount(&[], "EUR").unwrap();
        assert_eq!(total.amount(), Decimal::ZERO);
        assert_eq!(total.currency(), "EUR");
    }

    #[test]
    fn test_total_overflow_is_a_validation_error() {
        let items = vec![item("p1", 100, Money::unchecked(Decimal::MAX, "JPY"))];
        let error = calculate_total_amount(&items, "JPY").unwrap_err();
        assert_eq!(error.message(), "Total amount is out of range");
    }

    #[test]
    fn test_validate_accepts_well_formed_order() {
        let order = draft(vec![item("p1", 1, money(500, "USD"))]);
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_item_count_before_item_fields() {
        let mut items: Vec<OrderItem> =
            (0..11).map(|i| item(&format!("p{i}"), 1, money(1, "JPY"))).collect();
        items[0].quantity = 0;
        let error = draft(items).validate().unwrap_err();
        assert_eq!(error.message(), "Array must contain at most 10 element(s)");
    }

    #[test]
    fn test_validate_reports_first_bad_item_field() {
        let order = draft(vec![item("", 0, money(1, "JPY"))]);
        let error = order.validate().unwrap_err();
        assert_eq!(error.message(), "String must contain at least 1 character(s)");
    }

    #[test]
    fn test_validate_rejects_tampered_total() {
        let mut order = draft(vec![item("p1", 2, money(100, "JPY"))]);
        order.total_amount = money(1, "JPY");
        let error = order.validate().unwrap_err();
        assert_eq!(error.message(), "Total amount must equal the sum of item subtotals");
    }

    #[test]
    fn test_validate_rejects_updated_before_created() {
        let order = draft(vec![item("p1", 1, money(100, "JPY"))]);
        let earlier = order.created_at() - Duration::seconds(1);
        let order = order.with_status(order.status().clone(), earlier);
        let error = order.validate().unwrap_err();
        assert_eq!(error.message(), "updatedAt must not be earlier than createdAt");
    }

    #[test]
    fn test_order_serialization_shape() {
        let order = draft(vec![
            item("p1", 2, money(1000, "JPY")),
            item("p2", 1, money(1000, "JPY")),
        ]);
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000007");
        assert_eq!(json["customerId"], "00000000-0000-0000-0000-00000000002a");
        assert_eq!(json["status"]["type"], "DRAFT");
        assert_eq!(json["items"][0]["productId"], "p1");
        assert_eq!(json["items"][0]["unitPrice"]["currency"], "JPY");
        assert_eq!(json["totalAmount"]["currency"], "JPY");
        assert!(json["totalAmount"]["amount"].is_number());
        assert_eq!(json["totalAmount"]["amount"].as_f64(), Some(3000.0));
        assert_eq!(json["items"][0]["unitPrice"]["amount"].as_f64(), Some(1000.0));
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
        assert!(back.validate().is_ok());
    }

    #[test]
    fn test_deserialize_rejects_tampered_total() {
        let order = draft(vec![item("p1", 2, money(1000, "JPY"))]);
        let mut json = serde_json::to_value(&order).unwrap();
        json["totalAmount"]["amount"] = serde_json::json!(1);

        let error = serde_json::from_value::<Order>(json).unwrap_err();
        assert!(error
            .to_string()
            .contains("Total amount must equal the sum of item subtotals"));
    }

    #[test]
    fn test_deserialize_rejects_invalid_items() {
        let order = draft(vec![item("p1", 2, money(1000, "JPY"))]);
        let mut json = serde_json::to_value(&order).unwrap();
        json["items"] = serde_json::json!([]);

        let error = serde_json::from_value::<Order>(json).unwrap_err();
        assert!(error.to_string().contains("Array must contain at least 1 element(s)"));
    }
}
