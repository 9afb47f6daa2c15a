/// Version byte that prefixes every mainnet account address.
pub const ADDRESS_PREFIX: u8 = 0x41;

/// Length of a base58check address (`T...`).
pub const BASE58_ADDRESS_LEN: usize = 34;

/// Length of a hex address (`41...`).
pub const HEX_ADDRESS_LEN: usize = 42;

/// Encode a 21-byte address payload (prefix + 20 byte hash) as base58check.
pub fn encode_base58(payload: &[u8]) -> String {
    bs58::encode(payload).with_check().into_string()
}

/// Convert a hex address (`41...`) into its base58check form.
pub fn hex_to_base58(hex_address: &str) -> Option<String> {
    let bytes = hex::decode(hex_address).ok()?;
    if bytes.len() != 21 || bytes[0] != ADDRESS_PREFIX {
        return None;
    }
    Some(encode_base58(&bytes))
}

/// Returns the base58check form of a well-formed address, converting hex input.
///
/// `None` means the value is neither a valid base58check address nor a valid
/// hex address.
pub fn normalize(address: &str) -> Option<String> {
    match address.len() {
        BASE58_ADDRESS_LEN => {
            let bytes = bs58::decode(address).with_check(None).into_vec().ok()?;
            (bytes.len() == 21 && bytes[0] == ADDRESS_PREFIX).then(|| address.to_string())
        }
        HEX_ADDRESS_LEN => hex_to_base58(address),
        _ => None,
    }
}

/// Render an address for display; hex addresses are shown as base58check.
pub fn display(address: &str) -> String {
    normalize(address).unwrap_or_else(|| address.to_string())
}
