//! Procedural macros shared by the ardor crates

mod flags;

/// Turn a fieldless enum into a bit-flag set.
///
/// Each variant becomes an associated constant. Variants without a discriminant take the next power of 2,
/// a variant with discriminant `0` is used as the name of the empty set.
///
/// An optional integer type can be passed as the argument, e.g. `#[flags(u16)]`, otherwise the smallest type that fits all flags is used.
#[proc_macro_attribute]
pub fn flags(args: proc_macro::TokenStream, input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	flags::flags(args.into(), input.into()).into()
}
