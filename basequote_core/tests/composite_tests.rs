use std::time::Duration;

use basequote_core::vendors::dummy::DummyVendor;
use basequote_core::vendors::mock::MockVendor;
use basequote_core::{
    build_dispatcher, AppConfig, CompositeDispatcher, Currency, Money, SearchableVendor,
    SequenceRecord, VendorInfo,
};

fn batch() -> Vec<SequenceRecord> {
    vec![
        SequenceRecord::new(1, "a", "ATG"),
        SequenceRecord::new(2, "b", "GGC"),
    ]
}

#[tokio::test]
async fn test_yaml_to_offers_end_to_end() {
    let cfg = AppConfig::from_str(
        r#"
controller:
  vendors:
    - name: Demo Vendor
      shortName: DEMO
      backend: dummy
    - name: Unknown Vendor
      shortName: NOPE
      backend: not-a-backend
"#,
    )
    .unwrap();

    let mut report = build_dispatcher(&cfg).await;
    assert_eq!(report.dispatcher.vendor_count(), 2);
    assert_eq!(report.notices.len(), 1);

    let batch = batch();
    report.dispatcher.search_offers(&batch).await;
    assert!(
        report
            .dispatcher
            .wait_until_idle(1000, Duration::from_millis(1))
            .await,
        "aggregate never settled"
    );

    let offers = report.dispatcher.get_offers();
    assert_eq!(offers.len(), 2);
    for (set, seq) in offers.iter().zip(&batch) {
        assert_eq!(set.sequence.key, seq.key);
        assert_eq!(set.offers.len(), 2);
        // registration order: the dummy's real quote first, then the
        // placeholder from the unknown backend
        assert_eq!(set.offers[0].price, Some(Money::new(120.0, Currency::Eur)));
        assert_eq!(set.offers[0].turnaround, 14);
        assert!(!set.offers[1].price.unwrap().is_known());
        assert_eq!(set.offers[1].turnaround, -1);
    }
}

#[tokio::test]
async fn test_mixed_sync_and_background_vendors() {
    let mut dispatcher = CompositeDispatcher::new();
    dispatcher.register_vendor(
        VendorInfo::new(0, "Demo Vendor", "DEMO"),
        Box::new(DummyVendor::new()),
    );
    dispatcher.register_vendor(
        VendorInfo::new(1, "Mock Vendor", "MOCK"),
        Box::new(MockVendor::with_delay(Duration::from_millis(30))),
    );

    let batch = batch();
    dispatcher.search_offers(&batch).await;
    // the mock is still running, so the aggregate is too
    assert!(dispatcher.is_running());

    // a partial read while running must not fail; the mock contributes
    // nothing yet
    let partial = dispatcher.get_offers();
    assert_eq!(partial.len(), 2);

    assert!(
        dispatcher.wait_until_idle(1000, Duration::from_millis(2)).await,
        "mock vendor never finished"
    );

    let offers = dispatcher.get_offers();
    for set in &offers {
        assert_eq!(set.offers.len(), 2);
        assert_eq!(set.offers[0].vendor.short_name, "DummyVendor");
        assert_eq!(set.offers[1].vendor.short_name, "Mock");
    }
}

#[tokio::test]
async fn test_zero_configured_vendors() {
    let cfg = AppConfig::from_str("controller:\n  vendors: []\n").unwrap();
    let mut report = build_dispatcher(&cfg).await;

    assert!(report.dispatcher.vendors().is_empty());
    assert!(!report.dispatcher.is_running());

    let batch = batch();
    report.dispatcher.search_offers(&batch).await;
    assert!(!report.dispatcher.is_running());

    let offers = report.dispatcher.get_offers();
    assert_eq!(offers.len(), batch.len());
    assert!(offers.iter().all(|set| set.offers.is_empty()));
}

#[tokio::test]
async fn test_vendor_listing_matches_configuration_order() {
    let cfg = AppConfig::from_str(
        r#"
controller:
  vendors:
    - name: TWIST DNA
      shortName: TWIST
      backend: twist
    - name: IDT DNA
      shortName: IDT
      backend: idt
    - name: GeneArt
      shortName: GeneArt
      backend: geneart
"#,
    )
    .unwrap();

    let report = build_dispatcher(&cfg).await;
    let vendors = report.dispatcher.vendors();

    // twist and geneart degrade to placeholders here (no settings, or no
    // integration compiled in); idt without settings is substituted too.
    // All three stay visible, keyed by declaration order.
    assert_eq!(vendors.len(), 3);
    for (idx, vendor) in vendors.iter().enumerate() {
        assert_eq!(vendor.key, idx as u32);
    }
    assert_eq!(vendors[0].short_name, "TWIST");
    assert_eq!(vendors[1].short_name, "IDT");
    assert_eq!(vendors[2].short_name, "GeneArt");
}
