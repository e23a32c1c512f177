use chrono::DateTime;
use num_bigint::BigInt;
use num_traits::Num;
use proptest::prelude::*;
use tson::prelude::*;

/// arbitrary Inum for use with proptest, biased toward both variants
pub fn arb_inum() -> impl Strategy<Value = Inum> {
    prop_oneof![
        any::<i64>().prop_map(Inum::from),
        "-?1[0-1]{63,90}".prop_map(|n| Inum::from(BigInt::from_str_radix(&n, 2).unwrap())),
    ]
}

/// arbitrary finite, non-integral float; integral floats collapse to the
/// integer encoding and are covered separately
pub fn arb_fractional_float() -> impl Strategy<Value = f64> {
    (-1.0e9..1.0e9f64).prop_filter("fractional", |x| x.round_ties_even() != *x)
}

/// arbitrary Bytes for use with proptest
pub fn arb_bytes() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..64).prop_map(Bytes::from)
}

/// arbitrary instant, millisecond precision
pub fn arb_time() -> impl Strategy<Value = DateTime<Utc>> {
    (-4_102_444_800_000i64..4_102_444_800_000).prop_map(|ms| {
        DateTime::from_timestamp_millis(ms).unwrap()
    })
}

/// arbitrary canonical duration; the wire only ever carries canonical form
pub fn arb_duration() -> impl Strategy<Value = Duration> {
    let unit = prop_oneof![
        Just(Unit::Hour),
        Just(Unit::Minute),
        Just(Unit::Second),
        Just(Unit::Millisecond),
        Just(Unit::Microsecond),
        Just(Unit::Nanosecond),
    ];
    (any::<i64>(), unit).prop_map(|(amount, unit)| Duration::new(amount, unit).canonicalize())
}

/// arbitrary TSON for use with proptest
///
/// Coordinates are excluded: their encoding is lossy and they get their own
/// tolerance-based suite.
pub fn arb_tson() -> impl Strategy<Value = Tson> {
    let leaf = prop_oneof![
        Just(Tson::Null),
        any::<bool>().prop_map(Tson::from),
        arb_inum().prop_map(Tson::from),
        arb_fractional_float().prop_map(Tson::from),
        arb_bytes().prop_map(Tson::from),
        // NUL is excluded: the terminated string form cannot carry it
        "[^\\x00]{0,40}".prop_map(Tson::from),
        arb_time().prop_map(Tson::from),
        arb_duration().prop_map(Tson::from),
    ];
    leaf.prop_recursive(
        8,  // max depth
        64, // max nodes
        10, // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..10).prop_map(Tson::from),
                prop::collection::btree_map("[^\\x00]{0,12}", inner, 0..10)
                    .prop_map(|m| Tson::from(VecMap::from(m)))
            ]
        },
    )
}
