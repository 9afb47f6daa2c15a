use trondeck::domain::*;

#[test]
fn test_from_trx_whole_and_fractional() {
    assert_eq!(Sun::from_trx(1.0), Some(Sun::new(1_000_000)));
    assert_eq!(Sun::from_trx(10.5), Some(Sun::new(10_500_000)));
    assert_eq!(Sun::from_trx(0.000001), Some(Sun::new(1)));
}

#[test]
fn test_from_trx_rejects_unusable_amounts() {
    assert_eq!(Sun::from_trx(0.0), None);
    assert_eq!(Sun::from_trx(-3.0), None);
    assert_eq!(Sun::from_trx(f64::NAN), None);
    assert_eq!(Sun::from_trx(f64::INFINITY), None);
    assert_eq!(Sun::from_trx(0.0000001), None, "Below one Sun");
    assert_eq!(Sun::from_trx(1e30), None, "Does not fit in u64");
}

#[test]
fn test_display_uses_six_decimals() {
    assert_eq!(Sun::new(1_500_000).to_string(), "1.500000 TRX");
    assert_eq!(Sun::new(1).to_string(), "0.000001 TRX");
    assert_eq!(Sun::ZERO.to_string(), "0.000000 TRX");
}

#[test]
fn test_as_trx() {
    assert_eq!(Sun::new(2_250_000).as_trx(), 2.25);
}

#[test]
fn test_format_units() {
    assert_eq!(format_units(123_456, 3), "123.456");
    assert_eq!(format_units(5, 2), "0.05");
    assert_eq!(format_units(42, 0), "42");
    assert_eq!(format_units(7, 40), "7", "Unrepresentable precision shows raw");
}

#[test]
fn test_token_balance_formatted() {
    let balance = TokenBalance {
        info: TokenInfo {
            id: "1002000".to_string(),
            name: "BitTorrent".to_string(),
            abbr: "BTT".to_string(),
            precision: 6,
        },
        raw: 2_000_000,
    };

    assert_eq!(balance.formatted(), "2.000000 BTT");
}
