use crate::context::PHRASE;
use trondeck::adapter::Bip39KeyDeriver;
use trondeck::domain::{KeyError, address};
use trondeck::port::KeyDeriver;

#[test]
fn test_derivation_is_deterministic() {
    let keys = Bip39KeyDeriver::new();

    let first = keys.phrase_to_key(PHRASE).unwrap();
    let second = keys.phrase_to_key(PHRASE).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_derived_address_is_well_formed() {
    let material = Bip39KeyDeriver::new().phrase_to_key(PHRASE).unwrap();

    assert_eq!(material.address.len(), address::BASE58_ADDRESS_LEN);
    assert!(material.address.starts_with('T'));
    assert_eq!(
        address::normalize(&material.address).as_deref(),
        Some(material.address.as_str())
    );
}

#[test]
fn test_phrase_case_and_spacing_ignored() {
    let keys = Bip39KeyDeriver::new();
    let messy = format!("  {}\n", PHRASE.to_uppercase().replace(' ', "   "));

    assert_eq!(
        keys.phrase_to_key(&messy).unwrap(),
        keys.phrase_to_key(PHRASE).unwrap()
    );
}

#[test]
fn test_bad_checksum_phrase_rejected() {
    let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";

    let result = Bip39KeyDeriver::new().phrase_to_key(phrase);

    assert!(matches!(result, Err(KeyError::InvalidPhrase(_))));
}

#[test]
fn test_unknown_word_rejected() {
    let phrase = PHRASE.replace("about", "aboot");

    let result = Bip39KeyDeriver::new().phrase_to_key(&phrase);

    assert!(matches!(result, Err(KeyError::InvalidPhrase(_))));
}

#[test]
fn test_generated_phrase_derives() {
    let keys = Bip39KeyDeriver::new();

    let phrase = keys.generate_phrase().unwrap();

    assert_eq!(phrase.split_whitespace().count(), 12);
    assert!(keys.phrase_to_key(&phrase).is_ok());
    assert_ne!(phrase, keys.generate_phrase().unwrap());
}

#[test]
fn test_different_phrases_give_different_wallets() {
    let keys = Bip39KeyDeriver::new();
    let other = keys.generate_phrase().unwrap();

    assert_ne!(
        keys.phrase_to_key(&other).unwrap().address,
        keys.phrase_to_key(PHRASE).unwrap().address
    );
}
