use std::collections::BTreeSet;

use crate::generator::naming::identifiers::{
  IdentCase, NamingConvention, ensure_unique, is_plain_key, sanitize, to_identifier,
};

fn camel() -> NamingConvention {
  NamingConvention {
    case: IdentCase::Camel,
    ..NamingConvention::default()
  }
}

#[test]
fn sanitize_strips_invalid_characters() {
  assert_eq!(sanitize("user-profile"), "user_profile");
  assert_eq!(sanitize("  weird!!name  "), "weird_name");
  assert_eq!(sanitize("a__b___c"), "a_b_c");
  assert_eq!(sanitize(""), "");
}

#[test]
fn sanitize_transliterates_unicode() {
  assert_eq!(sanitize("café"), "cafe");
}

#[test]
fn pascal_case_identifiers() {
  let convention = NamingConvention::default();
  assert_eq!(to_identifier("user_profile", &convention), "UserProfile");
  assert_eq!(to_identifier("pet-store", &convention), "PetStore");
  assert_eq!(to_identifier("Pet", &convention), "Pet");
}

#[test]
fn camel_case_identifiers() {
  assert_eq!(to_identifier("UserProfile", &camel()), "userProfile");
  assert_eq!(to_identifier("pet-store", &camel()), "petStore");
}

#[test]
fn digit_led_names_get_prefixed() {
  assert!(to_identifier("1password", &NamingConvention::default()).starts_with("T1"));
  assert!(to_identifier("1password", &camel()).starts_with("_1"));
}

#[test]
fn reserved_words_get_suffixed() {
  // "enum" camel-cases to itself; Pascal "Enum" is not reserved.
  assert_eq!(to_identifier("enum", &camel()), "enumSchema");
  assert_eq!(to_identifier("enum", &NamingConvention::default()), "Enum");
  assert_eq!(to_identifier("z", &camel()), "zSchema");
}

#[test]
fn empty_names_get_placeholders() {
  assert_eq!(to_identifier("!!!", &NamingConvention::default()), "Unnamed");
  assert_eq!(to_identifier("", &camel()), "unnamed");
}

#[test]
fn ensure_unique_appends_counter() {
  let used: BTreeSet<String> = ["Pet".to_string(), "Pet2".to_string()].into();
  assert_eq!(ensure_unique("Pet", &used), "Pet3");
  assert_eq!(ensure_unique("Order", &used), "Order");
}

#[test]
fn plain_keys_need_no_quotes() {
  assert!(is_plain_key("petId"));
  assert!(is_plain_key("_internal"));
  assert!(is_plain_key("$ref"));
  assert!(is_plain_key("default"));
  assert!(!is_plain_key("x-rate-limit"));
  assert!(!is_plain_key("1st"));
  assert!(!is_plain_key(""));
}
