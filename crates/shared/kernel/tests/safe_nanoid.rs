use camp_kernel::SAFE_ALPHABET;
use camp_kernel::safe_nanoid;

#[test]
fn generates_expected_length_and_charset() {
    let id = safe_nanoid!();
    assert_eq!(id.len(), 12);

    for ch in id.chars() {
        assert!(SAFE_ALPHABET.contains(&ch), "unexpected character in nanoid: {ch}");
    }
}

#[test]
fn custom_length() {
    let id = safe_nanoid!(20);
    assert_eq!(id.len(), 20);
}

#[test]
fn generated_ids_pass_the_record_id_guard() {
    let id = safe_nanoid!();
    assert_eq!(camp_kernel::security::verify_record_id(&id).unwrap(), id);
}
