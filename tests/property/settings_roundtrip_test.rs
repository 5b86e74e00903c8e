//! Property-based tests for LoaderSettings serialization round-trip.

use labelmarks::types::settings::LoaderSettings;
use proptest::prelude::*;

fn arb_settings() -> impl Strategy<Value = LoaderSettings> {
    (
        "https?://[a-z]{3,12}\\.[a-z]{2,4}/[a-z0-9/?=&]{0,20}",
        1i64..i64::MAX,
        1u64..600,
        proptest::option::of("/[a-z0-9/_.-]{1,30}"),
    )
        .prop_map(|(source_url, ttl_millis, request_timeout_secs, database_path)| LoaderSettings {
            source_url,
            ttl_millis,
            request_timeout_secs,
            database_path,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn settings_json_roundtrip(settings in arb_settings()) {
        let json = serde_json::to_string(&settings).expect("serialization should succeed");
        let restored: LoaderSettings = serde_json::from_str(&json).expect("deserialization should succeed");
        prop_assert_eq!(restored, settings);
    }
}
