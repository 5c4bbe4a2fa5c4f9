#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use art_index::{ArtError, ArtMap};

#[derive(Arbitrary, Debug)]
enum MapMethod {
    Get { key: Vec<u8> },
    Insert { key: Vec<u8>, val: usize },
    Record { key: Vec<u8> },
    Update { key: Vec<u8>, val: usize },
    Delete { key: Vec<u8> },
}

fn conflicts(bt_map: &BTreeMap<Vec<u8>, (usize, u64)>, key: &[u8]) -> bool {
    bt_map
        .keys()
        .any(|e| e.as_slice() != key && (e.starts_with(key) || key.starts_with(e)))
}

fuzz_target!(|methods: Vec<MapMethod>| {
    let mut art = ArtMap::<usize>::new();
    let mut bt_map = BTreeMap::<Vec<u8>, (usize, u64)>::new();

    for m_c in methods.chunks(1024) {
        for m in m_c {
            match m {
                MapMethod::Get { key } => {
                    let art_v = art.get(key).copied();
                    let bt_v = bt_map.get(key).map(|(v, _)| *v);
                    assert_eq!(art_v, bt_v);
                }
                MapMethod::Insert { key, val } => {
                    let expected = if bt_map.contains_key(key) {
                        Err(ArtError::DuplicateKey)
                    } else if conflicts(&bt_map, key) {
                        Err(ArtError::PrefixConflict)
                    } else {
                        bt_map.insert(key.clone(), (*val, 1));
                        Ok(())
                    };
                    let a_insert = art.insert(key, *val);
                    assert_eq!(a_insert, expected, "insert {:02x?}", key);
                }
                MapMethod::Record { key } => {
                    let expected = if let Some((_, hits)) = bt_map.get_mut(key) {
                        *hits += 1;
                        Ok(*hits)
                    } else if conflicts(&bt_map, key) {
                        Err(ArtError::PrefixConflict)
                    } else {
                        bt_map.insert(key.clone(), (0, 1));
                        Ok(1)
                    };
                    assert_eq!(art.record(key, 0), expected, "record {:02x?}", key);
                }
                MapMethod::Update { key, val } => {
                    let old_bt = bt_map.get_mut(key).map(|(v, _)| v);
                    let old_art = art.get_mut(key);
                    assert_eq!(old_art, old_bt);

                    if let (Some(old_bt), Some(old_art)) = (old_bt, old_art) {
                        *old_bt = *val;
                        *old_art = *val;
                    }
                    assert_eq!(art.get(key), bt_map.get(key).map(|(v, _)| v));
                }
                MapMethod::Delete { key } => {
                    let btr = bt_map.remove(key).map(|(v, _)| v);
                    let artr = art.remove(key);
                    assert_eq!(artr, btr, "delete {:02x?}", key);
                }
            }
        }
        assert_eq!(art.len(), bt_map.len());
        if let Err(e) = art.check_invariants() {
            panic!("{e}\n{}", art.dump());
        }
    }

    for (k, (expected_value, hits)) in bt_map.iter() {
        assert_eq!(art.get(k), Some(expected_value), "key {:02x?}", k);
        assert_eq!(art.hits(k), Some(*hits));
    }
    let art_keys: Vec<Vec<u8>> = art.iter().map(|(k, _)| k).collect();
    let bt_keys: Vec<Vec<u8>> = bt_map.keys().cloned().collect();
    assert_eq!(art_keys, bt_keys);
});
