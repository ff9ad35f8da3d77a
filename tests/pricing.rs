use food_orders::services::pricing::{
    order_totals, received_item_count, requested_item_count, to_be_paid_totals, PriceTotals,
    PricedLine, PricingError, UnitPrices,
};

const IDLI: UnitPrices = UnitPrices {
    base: 100,
    employee: 80,
    hospital: 120,
};

const THALI: UnitPrices = UnitPrices {
    base: 150,
    employee: 120,
    hospital: 180,
};

#[test]
fn order_totals_sum_each_price_column() {
    let lines = [PricedLine::requested(2, IDLI)];
    assert_eq!(
        order_totals(&lines).unwrap(),
        PriceTotals {
            price: 200,
            employee_price: 160,
            hospital_price: 240,
        }
    );

    let lines = [PricedLine::requested(2, IDLI), PricedLine::requested(1, THALI)];
    assert_eq!(
        order_totals(&lines).unwrap(),
        PriceTotals {
            price: 350,
            employee_price: 280,
            hospital_price: 420,
        }
    );
    assert_eq!(requested_item_count(&lines).unwrap(), 3);
}

#[test]
fn to_be_paid_uses_received_counts() {
    let lines = [PricedLine {
        quantity: 2,
        received: Some(1),
        unit: IDLI,
    }];
    assert_eq!(
        to_be_paid_totals(&lines).unwrap(),
        PriceTotals {
            price: 100,
            employee_price: 80,
            hospital_price: 120,
        }
    );
    assert_eq!(received_item_count(&lines).unwrap(), 1);
}

#[test]
fn missing_receipt_counts_as_full_quantity() {
    let lines = [
        PricedLine::requested(2, IDLI),
        PricedLine {
            quantity: 3,
            received: Some(0),
            unit: THALI,
        },
    ];
    let paid = to_be_paid_totals(&lines).unwrap();
    assert_eq!(paid.price, 200);
    assert_eq!(paid.employee_price, 160);
    assert_eq!(paid.hospital_price, 240);
    assert_eq!(received_item_count(&lines).unwrap(), 2);
}

#[test]
fn empty_order_totals_are_zero() {
    assert_eq!(order_totals(&[]).unwrap(), PriceTotals::default());
    assert_eq!(to_be_paid_totals(&[]).unwrap(), PriceTotals::default());
}

#[test]
fn negative_inputs_are_rejected() {
    let lines = [PricedLine::requested(1, IDLI), PricedLine::requested(-1, IDLI)];
    assert_eq!(
        order_totals(&lines),
        Err(PricingError::NegativeQuantity {
            line: 1,
            quantity: -1,
        })
    );

    let lines = [PricedLine {
        quantity: 1,
        received: Some(-2),
        unit: IDLI,
    }];
    assert!(matches!(
        to_be_paid_totals(&lines),
        Err(PricingError::NegativeQuantity { line: 0, .. })
    ));

    let lines = [PricedLine::requested(
        1,
        UnitPrices {
            employee: -5,
            ..IDLI
        },
    )];
    assert!(matches!(
        order_totals(&lines),
        Err(PricingError::NegativePrice { line: 0, value: -5, .. })
    ));
}

#[test]
fn overflow_is_an_error_not_a_wrap() {
    let lines = [PricedLine::requested(
        2,
        UnitPrices {
            base: i64::MAX,
            employee: 0,
            hospital: 0,
        },
    )];
    assert_eq!(order_totals(&lines), Err(PricingError::Overflow { line: 0 }));
}
