use housing_hub::{
    ConfigurationError,
    error::MortgageError,
    models::{Identity, IdentityUpdate, Inquiry, LoginRequest, Property, PropertyFilter, Role},
    mortgage::{MortgageInput, monthly_payment},
};
use serde_json::json;

// --- Role ---

#[test]
fn test_role_wire_form_is_uppercase() {
    assert_eq!(serde_json::to_value(Role::Seller).unwrap(), json!("SELLER"));
    let role: Role = serde_json::from_value(json!("ADMIN")).unwrap();
    assert_eq!(role, Role::Admin);
    assert!(serde_json::from_value::<Role>(json!("admin")).is_err());
}

#[test]
fn test_role_from_str_rejects_unknown() {
    assert_eq!("BUYER".parse::<Role>(), Ok(Role::Buyer));
    assert_eq!(
        "AGENT".parse::<Role>(),
        Err(ConfigurationError::UnknownRole("AGENT".to_string()))
    );
}

// --- Identity ---

#[test]
fn test_identity_uses_camel_case() {
    let identity: Identity = serde_json::from_value(json!({
        "id": "42",
        "email": "kim@example.com",
        "fullName": "Kim Seller",
        "role": "SELLER"
    }))
    .unwrap();

    assert_eq!(identity.full_name, "Kim Seller");
    assert_eq!(identity.role, Role::Seller);
}

#[test]
fn test_identity_update_omits_unset_fields() {
    let update = IdentityUpdate {
        full_name: Some("Kim".to_string()),
        ..Default::default()
    };
    assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "fullName": "Kim" }));
    assert!(!update.is_empty());
    assert!(IdentityUpdate::default().is_empty());
}

#[test]
fn test_login_request_debug_hides_password() {
    let request = LoginRequest {
        email: "kim@example.com".to_string(),
        password: "s3cret".to_string(),
    };
    let rendered = format!("{:?}", request);
    assert!(rendered.contains("kim@example.com"));
    assert!(!rendered.contains("s3cret"));
}

// --- Listings ---

#[test]
fn test_property_type_field_is_renamed() {
    let property: Property = serde_json::from_value(json!({
        "id": "p-1",
        "title": "Studio",
        "price": 900.0,
        "area": 28.5,
        "type": "FOR_RENT"
    }))
    .unwrap();

    assert_eq!(property.listing_type, "FOR_RENT");
    assert_eq!(property.description, "");
    assert!(!property.approved);
}

#[test]
fn test_empty_filter_serializes_to_nothing() {
    assert_eq!(
        serde_json::to_value(PropertyFilter::default()).unwrap(),
        json!({})
    );
}

#[test]
fn test_inquiry_without_buyer() {
    let inquiry: Inquiry = serde_json::from_value(json!({
        "id": "i-3",
        "message": "Still available?",
        "createdAt": "2024-01-15T12:00:00Z"
    }))
    .unwrap();

    assert!(inquiry.buyer.is_none());
    assert!(inquiry.property.is_none());
}

// --- Mortgage ---

fn input(home_value: f64, down_payment: f64, rate: f64, years: u32) -> MortgageInput {
    MortgageInput {
        home_value,
        down_payment,
        annual_rate_percent: rate,
        term_years: years,
    }
}

#[test]
fn test_monthly_payment_standard_loan() {
    // 200k over 30 years at 6% is the textbook 1199.10.
    let payment = monthly_payment(&input(250_000.0, 50_000.0, 6.0, 30)).unwrap();
    assert!((payment - 1199.10).abs() < 0.01, "got {}", payment);
}

#[test]
fn test_monthly_payment_zero_rate() {
    let payment = monthly_payment(&input(120_000.0, 0.0, 0.0, 10)).unwrap();
    assert!((payment - 1000.0).abs() < f64::EPSILON);
}

#[test]
fn test_monthly_payment_fully_paid_down() {
    let payment = monthly_payment(&input(100_000.0, 100_000.0, 5.0, 15)).unwrap();
    assert_eq!(payment, 0.0);
}

#[test]
fn test_monthly_payment_rejects_bad_input() {
    assert_eq!(
        monthly_payment(&input(100_000.0, 0.0, 5.0, 0)),
        Err(MortgageError::InvalidTerm)
    );
    assert_eq!(
        monthly_payment(&input(100_000.0, -1.0, 5.0, 30)),
        Err(MortgageError::NegativeInput)
    );
    assert_eq!(
        monthly_payment(&input(f64::NAN, 0.0, 5.0, 30)),
        Err(MortgageError::NegativeInput)
    );
    assert_eq!(
        monthly_payment(&input(100_000.0, 150_000.0, 5.0, 30)),
        Err(MortgageError::DownPaymentTooLarge)
    );
    assert_eq!(
        monthly_payment(&input(300_000.0, 60_000.0, f64::MAX, 30)),
        Err(MortgageError::OutOfRange)
    );
}

#[test]
fn test_monthly_payment_tiny_rate_stays_finite() {
    // (1+r)^n rounds to exactly 1.0 here if computed naively.
    let payment = monthly_payment(&input(300_000.0, 60_000.0, 1e-15, 30)).unwrap();
    let interest_free = 240_000.0 / 360.0;
    assert!((payment - interest_free).abs() < 1e-6, "got {}", payment);
}

#[test]
fn test_monthly_payment_huge_rate_is_interest_only() {
    // (1+r)^n overflows; the payment converges to principal * monthly rate.
    let payment = monthly_payment(&input(300_000.0, 60_000.0, 1e6, 30)).unwrap();
    let interest_only = 240_000.0 * (1e6 / 100.0 / 12.0);
    assert!(payment.is_finite());
    assert!((payment - interest_only).abs() / interest_only < 1e-9, "got {}", payment);
}

#[test]
fn test_mortgage_input_wire_form() {
    let parsed: MortgageInput = serde_json::from_value(json!({
        "homeValue": 300000.0,
        "downPayment": 60000.0,
        "annualRatePercent": 4.5,
        "termYears": 25
    }))
    .unwrap();
    assert_eq!(parsed, input(300_000.0, 60_000.0, 4.5, 25));
}
