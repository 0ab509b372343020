//! WhatsApp checkout message and link.

use percent_encoding::percent_decode_str;
use softo_commerce::checkout::encode_component;
use softo_commerce::prelude::*;

fn two_item_cart() -> CartStore<MemoryPersistence> {
    let mut store = CartStore::open(MemoryPersistence::new(Currency::IQD), Currency::IQD);
    store.add(
        LineCandidate::new("hoodie__L", "هودي أسود", Money::from_major(45000, Currency::IQD))
            .with_size(Size::new("L")),
        2.0,
    );
    store.add(
        LineCandidate::new("runner__42", "Runner & Co", Money::from_major(60000, Currency::IQD))
            .with_size(Size::new("42")),
        1.0,
    );
    store
}

fn english_config() -> CheckoutConfig {
    CheckoutConfig {
        phone: "+90 501 595 4826".to_string(),
        greeting: "Hello SoftoDev, I'd like to confirm this order:".to_string(),
        total_label: "Total".to_string(),
        empty_message: "Hello SoftoDev, I'd like to order.".to_string(),
        currency_symbol: "IQD ".to_string(),
    }
}

#[test]
fn message_has_one_line_per_item_and_a_total() {
    let store = two_item_cart();
    let message = build_message(&english_config(), &store.items(), store.total());

    assert_eq!(
        message,
        "Hello SoftoDev, I'd like to confirm this order:\n\
         \n\
         1) هودي أسود ×2 — IQD 90000\n\
         2) Runner & Co ×1 — IQD 60000\n\
         \n\
         Total: IQD 150000"
    );
}

#[test]
fn message_rounds_half_amounts_up() {
    let mut store = CartStore::open(MemoryPersistence::new(Currency::IQD), Currency::IQD);
    store.add(
        LineCandidate::new("cap", "Cap", Money::from_decimal(12.5, Currency::IQD)),
        1.0,
    );

    let message = build_message(&english_config(), &store.items(), store.total());
    assert!(message.contains("1) Cap ×1 — IQD 13\n"));
    assert!(message.ends_with("Total: IQD 13"));
}

#[test]
fn link_round_trips_through_query_encoding() {
    let store = two_item_cart();
    let config = english_config();
    let link = config.link_for(store.cart());

    let text = link
        .strip_prefix("https://wa.me/905015954826?text=")
        .expect("link targets the configured phone");
    assert!(!text.contains(' '));
    assert!(!text.contains('&'));
    assert!(!text.contains('\n'));

    let decoded = percent_decode_str(text).decode_utf8().unwrap();
    assert_eq!(
        decoded,
        build_message(&config, &store.items(), store.total())
    );
}

#[test]
fn link_matches_build_link() {
    let store = two_item_cart();
    let config = CheckoutConfig::default();

    assert_eq!(
        config.link_for(store.cart()),
        build_link(&config, &store.items(), store.total())
    );
}

#[test]
fn empty_cart_sends_empty_message() {
    let store = CartStore::open(MemoryPersistence::new(Currency::IQD), Currency::IQD);
    let config = english_config();

    assert_eq!(
        config.link_for(store.cart()),
        format!(
            "https://wa.me/905015954826?text={}",
            encode_component("Hello SoftoDev, I'd like to order.")
        )
    );
}

#[test]
fn default_message_is_arabic() {
    let store = two_item_cart();
    let message = build_message(&CheckoutConfig::default(), &store.items(), store.total());

    assert!(message.starts_with("مرحبا SoftoDev، أريد تأكيد هذا الطلب:\n\n1) "));
    assert!(message.ends_with("\n\nالإجمالي: 150000"));
}
