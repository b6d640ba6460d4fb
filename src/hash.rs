//! Hash container aliases used by the registry and session tables.

use foldhash::fast::RandomState;

pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, RandomState>;
