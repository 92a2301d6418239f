//! Collections of primitives paired with their declared types
//!
//! Each strategy yields `(value, type tag)`. Annotations are drawn in both
//! bare (`List`) and parameterised (`List[int]`) forms.

use crate::primitives::{PrimitiveKind, PrimitiveSet, primitive_kinds};
use crate::types::{MapKind, SeqKind, SetKind, TypeTag};
use crate::value::Value;
use proptest::collection::{btree_map, btree_set, vec};
use proptest::prelude::*;
use proptest::sample::select;

const MAX_ITEMS: usize = 8;

fn item_tag(kind: PrimitiveKind, parameterised: bool) -> Option<Box<TypeTag>> {
    parameterised.then(|| Box::new(kind.type_tag()))
}

/// Lists of one primitive kind, annotated `List`, `Sequence` or `MutableSequence`
pub fn lists_of_primitives(set: PrimitiveSet) -> BoxedStrategy<(Value, TypeTag)> {
    primitive_kinds(set)
        .prop_flat_map(|kind| {
            let tag = (select(SeqKind::all().to_vec()), any::<bool>()).prop_map(
                move |(seq, parameterised)| TypeTag::Seq {
                    kind: seq,
                    item: item_tag(kind, parameterised),
                },
            );
            (vec(kind.values(), 0..MAX_ITEMS).prop_map(Value::List), tag)
        })
        .boxed()
}

/// Homogeneous tuples, annotated `Tuple[T, ...]`, `Sequence[T]`, `Tuple` or `Sequence`
pub fn tuples_of_primitives(set: PrimitiveSet) -> BoxedStrategy<(Value, TypeTag)> {
    primitive_kinds(set)
        .prop_flat_map(|kind| {
            let item = Box::new(kind.type_tag());
            let tag = prop_oneof![
                Just(TypeTag::Tuple {
                    item: Some(item.clone())
                }),
                Just(TypeTag::Seq {
                    kind: SeqKind::Sequence,
                    item: Some(item),
                }),
                Just(TypeTag::Tuple { item: None }),
                Just(TypeTag::Seq {
                    kind: SeqKind::Sequence,
                    item: None,
                }),
            ];
            (vec(kind.values(), 0..MAX_ITEMS).prop_map(Value::Tuple), tag)
        })
        .boxed()
}

/// Mutable sets, annotated `Set` or `MutableSet`, bare or parameterised
pub fn mut_sets_of_primitives(set: PrimitiveSet) -> BoxedStrategy<(Value, TypeTag)> {
    primitive_kinds(set)
        .prop_flat_map(|kind| {
            let tag = (select(SetKind::all().to_vec()), any::<bool>()).prop_map(
                move |(set_kind, parameterised)| TypeTag::Set {
                    kind: set_kind,
                    item: item_tag(kind, parameterised),
                },
            );
            (btree_set(kind.values(), 0..MAX_ITEMS).prop_map(Value::Set), tag)
        })
        .boxed()
}

/// Frozen sets, annotated `Set` or `Set[T]`
pub fn frozen_sets_of_primitives(set: PrimitiveSet) -> BoxedStrategy<(Value, TypeTag)> {
    primitive_kinds(set)
        .prop_flat_map(|kind| {
            let tag = any::<bool>().prop_map(move |parameterised| TypeTag::Set {
                kind: SetKind::Set,
                item: item_tag(kind, parameterised),
            });
            (
                btree_set(kind.values(), 0..MAX_ITEMS).prop_map(Value::FrozenSet),
                tag,
            )
        })
        .boxed()
}

/// Lists or tuples of primitives
pub fn seqs_of_primitives(set: PrimitiveSet) -> BoxedStrategy<(Value, TypeTag)> {
    prop_oneof![lists_of_primitives(set), tuples_of_primitives(set)].boxed()
}

/// Mutable or frozen sets of primitives
pub fn sets_of_primitives(set: PrimitiveSet) -> BoxedStrategy<(Value, TypeTag)> {
    prop_oneof![mut_sets_of_primitives(set), frozen_sets_of_primitives(set)].boxed()
}

/// Mapping annotation for keys of `key` and values of `value`: bare,
/// fully parameterised, or with either side widened to `Any`
pub fn generic_dict_types(key: TypeTag, value: TypeTag) -> BoxedStrategy<TypeTag> {
    let kinds = || select(MapKind::all().to_vec());
    let (full_key, full_value) = (key.clone(), value.clone());
    prop_oneof![
        kinds().prop_map(|kind| TypeTag::Map { kind, params: None }),
        kinds().prop_map(move |kind| TypeTag::map_of(kind, full_key.clone(), full_value.clone())),
        kinds().prop_map(move |kind| TypeTag::map_of(kind, TypeTag::Any, value.clone())),
        kinds().prop_map(move |kind| TypeTag::map_of(kind, key.clone(), TypeTag::Any)),
    ]
    .boxed()
}

/// Dicts mapping one primitive kind to another
pub fn dicts_of_primitives(set: PrimitiveSet) -> BoxedStrategy<(Value, TypeTag)> {
    (primitive_kinds(set), primitive_kinds(set))
        .prop_flat_map(|(key, value)| {
            (
                btree_map(key.values(), value.values(), 0..MAX_ITEMS).prop_map(Value::Map),
                generic_dict_types(key.type_tag(), value.type_tag()),
            )
        })
        .boxed()
}
