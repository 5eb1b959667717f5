//! Head identifiers for structured reader output.
//!
//! Every structured form the reader or classifier produces is a sequence
//! whose first element is one of these identifiers. Downstream passes
//! dispatch on the head; keeping the names in one place keeps producer and
//! consumer in sync.

/// Whole-file unit.
pub const FILE: &str = "file";
/// Square-bracket group.
pub const VEC: &str = "vec";
/// Curly-brace group.
pub const DICT: &str = "dict";

/// `,x` — unquote marker.
pub const UNQUOTE: &str = "unquote";
/// `$x` — literal-typed value marker.
pub const TYPED_LITERAL: &str = "typed-literal";
/// `...x` — spread marker.
pub const SPREAD: &str = "spread";
/// `~T` — underlying-type marker.
pub const UNDERLYING_TYPE: &str = "underlying-type";
/// `&x` — address-of.
pub const ADDRESS_OF: &str = "address-of";
/// `*x` — dereference.
pub const DEREF: &str = "deref";
/// `!x` — negation.
pub const NOT: &str = "not";

/// `<-chan[T]` — receive-only channel type.
pub const RECV_CHAN_TYPE: &str = "recv-chan-type";
/// `chan<-[T]` — send-only channel type.
pub const SEND_CHAN_TYPE: &str = "send-chan-type";
/// `chan[T]` — bidirectional channel type.
pub const CHAN_TYPE: &str = "chan-type";
/// `[]T` — slice type.
pub const SLICE_TYPE: &str = "slice-type";
/// `[n]T` — fixed-size array type.
pub const ARRAY_TYPE: &str = "array-type";
/// `map[K]V` — map type.
pub const MAP_TYPE: &str = "map-type";
/// `func[params]ret` — function type.
pub const FUNC_TYPE: &str = "func-type";
/// `Name[T1,T2]` — generic instantiation.
pub const GENERIC_TYPE: &str = "generic-type";
/// `a.b.c` — qualified access path.
pub const DOT_PATH: &str = "dot-path";
