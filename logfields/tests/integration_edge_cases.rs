//! Edge-case coverage for failing members and hand-written descriptors.
//!
//! These tests focus on salvage behavior: a member that cannot be built or
//! read is dropped on its own, and everything else still reaches the log.
//! The property tests check derived params against direct field access.

use std::fmt;

use logfields::{
    build_metadata, AccessError, AnyLogFields, BuildError, DescriptorBuilder, LogFields,
    MetadataCache, ParamValue, Sensitivity, ToParamValue,
};
use proptest::prelude::*;

pub struct Ledger {
    pub account: String,
    pub balance: Option<i64>,
}

impl LogFields for Ledger {
    fn describe(builder: &mut DescriptorBuilder<Self>) {
        builder
            .field("account", Sensitivity::None, |ledger: &Self| {
                ledger.account.to_param_value()
            })
            .try_field("balance", Sensitivity::Sensitive, |ledger: &Self| {
                ledger
                    .balance
                    .map(ParamValue::I64)
                    .ok_or_else(|| AccessError::unavailable("ledger is closed"))
            })
            .probe("branch", Sensitivity::None, || {
                Err::<fn(&Self) -> Result<ParamValue, AccessError>, _>(BuildError::probe(
                    "branch",
                    "no branch directory",
                ))
            })
            .field("account_len", Sensitivity::None, |ledger: &Self| {
                ledger.account.len().to_param_value()
            });
    }
}

#[test]
fn test_failed_probe_is_left_out_of_metadata() {
    let metadata = build_metadata::<Ledger>();
    assert_eq!(
        metadata.names().collect::<Vec<_>>(),
        ["account", "balance", "account_len"]
    );
    assert_eq!(metadata.skipped().len(), 1);
    assert!(metadata.skipped()[0]
        .to_string()
        .contains("no branch directory"));
}

#[test]
fn test_failed_read_drops_one_param() {
    let cache = MetadataCache::new();
    let closed = Ledger {
        account: "acct".into(),
        balance: None,
    };

    let params = cache.parse_into_params(&closed);
    assert_eq!(
        params.iter().map(|param| param.name).collect::<Vec<_>>(),
        ["account", "account_len"]
    );

    let extraction = cache.extract(&closed);
    assert!(!extraction.is_complete());
    assert_eq!(extraction.errors.len(), 1);
    assert_eq!(extraction.errors[0].field, "balance");
    assert_eq!(
        extraction.errors[0].error,
        AccessError::unavailable("ledger is closed")
    );
}

#[test]
fn test_successful_read_is_complete() {
    let cache = MetadataCache::new();
    let open = Ledger {
        account: "acct".into(),
        balance: Some(-20),
    };

    let extraction = cache.extract(&open);
    assert!(extraction.is_complete());
    assert_eq!(extraction.params[1].value, ParamValue::I64(-20));
    assert_eq!(extraction.params[1].sensitivity, Sensitivity::Sensitive);
}

#[test]
fn test_descriptor_rejects_foreign_instance() {
    let metadata = build_metadata::<Ledger>();
    let descriptor = metadata.get("account").unwrap();

    let err = descriptor.read(&42_u8).unwrap_err();
    assert!(matches!(err, AccessError::TypeMismatch { .. }));

    let extraction = metadata.extract(&42_u8);
    assert!(extraction.params.is_empty());
    assert_eq!(extraction.errors.len(), metadata.len());
}

#[test]
fn test_heterogeneous_instances_through_dyn() {
    #[derive(logfields::LogFields)]
    pub struct Ping {
        pub seq: u32,
    }

    let cache = MetadataCache::new();
    let events: Vec<Box<dyn AnyLogFields>> = vec![
        Box::new(Ping { seq: 1 }),
        Box::new(Ledger {
            account: "a".into(),
            balance: Some(1),
        }),
        Box::new(Ping { seq: 2 }),
    ];

    let counts: Vec<_> = events
        .iter()
        .map(|event| cache.parse_dyn(event.as_ref()).len())
        .collect();
    assert_eq!(counts, [1, 3, 1]);
    assert_eq!(cache.len(), 2);
}

/// A value whose formatter fails, as a getter backed by a closed resource would.
pub struct Flaky;

impl fmt::Display for Flaky {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        Err(fmt::Error)
    }
}

impl fmt::Debug for Flaky {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Flaky(")?;
        Err(fmt::Error)
    }
}

#[derive(logfields::LogFields)]
pub struct Event {
    pub id: u32,
    #[log_fields(display)]
    pub shown: Flaky,
    #[log_fields(debug)]
    #[sensitive]
    pub inspected: Flaky,
    pub source: &'static str,
}

#[test]
fn test_failing_formatter_drops_only_its_param() {
    let cache = MetadataCache::new();
    let event = Event {
        id: 4,
        shown: Flaky,
        inspected: Flaky,
        source: "billing",
    };

    let params = cache.parse_into_params(&event);
    assert_eq!(
        params.iter().map(|param| param.name).collect::<Vec<_>>(),
        ["id", "source"]
    );
    assert_eq!(params[0].value, ParamValue::U64(4));

    let extraction = cache.extract(&event);
    assert_eq!(
        extraction
            .errors
            .iter()
            .map(|failure| failure.field)
            .collect::<Vec<_>>(),
        ["shown", "inspected"]
    );
    assert!(matches!(
        extraction.errors[0].error,
        AccessError::Unavailable { .. }
    ));
}

#[derive(logfields::LogFields)]
pub struct Quote {
    pub symbol: String,
    pub bid: i64,
    pub size: u32,
    pub live: bool,
}

proptest! {
    #[test]
    fn prop_params_match_direct_access(
        symbol in "[A-Z]{1,5}",
        bid in any::<i64>(),
        size in any::<u32>(),
        live in any::<bool>(),
    ) {
        let quote = Quote { symbol, bid, size, live };
        let params = logfields::parse_into_params(&quote);

        prop_assert_eq!(params.len(), 4);
        prop_assert!(params.iter().all(|param| param.sensitivity == Sensitivity::None));
        prop_assert_eq!(params[0].value.as_str(), Some(quote.symbol.as_str()));
        prop_assert_eq!(params[1].value.as_i64(), Some(quote.bid));
        prop_assert_eq!(&params[2].value, &ParamValue::U64(u64::from(quote.size)));
        prop_assert_eq!(params[3].value.as_bool(), Some(quote.live));
    }

    #[test]
    fn prop_failed_reads_never_drop_other_fields(
        account in ".{0,16}",
        balance in proptest::option::of(any::<i64>()),
    ) {
        let ledger = Ledger { account, balance };
        let extraction = MetadataCache::global().extract(&ledger);

        prop_assert_eq!(extraction.params.len() + extraction.errors.len(), 3);
        prop_assert_eq!(extraction.is_complete(), ledger.balance.is_some());
        prop_assert_eq!(&extraction.params[0].value, &ParamValue::Str(ledger.account.clone()));
    }
}
