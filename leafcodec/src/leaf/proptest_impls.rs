use alloy_primitives::{Address, U256};
use proptest::{prelude::*, sample::select};
use serde_json::Value;

use super::{LeafType, Salt, SaltedLeaf, TypedValue};

impl Arbitrary for LeafType {
    type Parameters = ();
    type Strategy = proptest::sample::Select<LeafType>;

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        select(LeafType::ALL.to_vec())
    }
}

impl Arbitrary for Salt {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        any::<[u8; 32]>().prop_map(Salt).boxed()
    }
}

/// Values of `ty`, in the form the codec decodes them to
fn canonical_value(ty: LeafType) -> BoxedStrategy<Value> {
    let to_hex = |bytes: &[u8]| Value::String(format!("0x{}", hex::encode(bytes)));

    match ty {
        LeafType::String => any::<String>().prop_map(Value::String).boxed(),
        LeafType::Bool => any::<bool>().prop_map(Value::Bool).boxed(),
        LeafType::Uint8 => any::<u8>().prop_map(Value::from).boxed(),
        LeafType::Uint32 => any::<u32>().prop_map(Value::from).boxed(),
        LeafType::Uint64 => any::<u64>().prop_map(|n| Value::String(n.to_string())).boxed(),
        LeafType::Uint256 => any::<[u8; 32]>()
            .prop_map(|bytes| Value::String(U256::from_be_bytes(bytes).to_string()))
            .boxed(),
        LeafType::Address => any::<[u8; 20]>()
            .prop_map(|bytes| Value::String(Address::from(bytes).to_checksum(None)))
            .boxed(),
        LeafType::Bytes32 => any::<[u8; 32]>().prop_map(move |b| to_hex(&b)).boxed(),
        LeafType::Bytes => any::<Vec<u8>>().prop_map(move |b| to_hex(&b)).boxed(),
    }
}

impl Arbitrary for TypedValue {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        any::<LeafType>()
            .prop_flat_map(|ty| (Just(ty), any::<String>(), canonical_value(ty)))
            .prop_map(|(ty, name, value)| TypedValue::new(ty, name, value))
            .boxed()
    }
}

impl Arbitrary for SaltedLeaf {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        (any::<TypedValue>(), any::<Salt>())
            .prop_map(|(typed, salt)| typed.with_salt(salt))
            .boxed()
    }
}
