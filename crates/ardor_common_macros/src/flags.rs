use proc_macro2::{TokenStream, Span};
use quote::quote;
use syn::{Data, DeriveInput, Expr, ExprLit, Ident, Lit};

const BASE_TYPES : [&str; 5] = ["u8", "u16", "u32", "u64", "u128"];

struct FlagVariant {
	ident : Ident,
	attrs : Vec<syn::Attribute>,
	bits  : u128,
}

fn error(span: Span, msg: &str) -> TokenStream {
	syn::Error::new(span, msg).to_compile_error()
}

fn pick_base_type(args: TokenStream, max_val: u128) -> Result<Ident, TokenStream> {
	if !args.is_empty() {
		let ident = syn::parse2::<Ident>(args).map_err(|err| err.to_compile_error())?;
		if !BASE_TYPES.iter().any(|name| ident == name) {
			return Err(error(ident.span(), "Expected one of `u8`, `u16`, `u32`, `u64` or `u128` as the flag storage type"));
		}
		return Ok(ident);
	}

	let name = if max_val <= u8::MAX as u128 {
		"u8"
	} else if max_val <= u16::MAX as u128 {
		"u16"
	} else if max_val <= u32::MAX as u128 {
		"u32"
	} else if max_val <= u64::MAX as u128 {
		"u64"
	} else {
		"u128"
	};
	Ok(Ident::new(name, Span::call_site()))
}

fn collect_variants(input: &DeriveInput) -> Result<(Vec<FlagVariant>, Option<Ident>), TokenStream> {
	let body = match &input.data {
		Data::Enum(body) => body,
		_ => return Err(error(input.ident.span(), "`#[flags]` can only be applied to an enum")),
	};

	let mut variants = Vec::new();
	let mut none_ident = None;
	let mut next : u128 = 1;

	for variant in &body.variants {
		if !variant.fields.is_empty() {
			return Err(error(variant.ident.span(), "Flag variants cannot carry data"));
		}

		let bits = match &variant.discriminant {
			Some((_, Expr::Lit(ExprLit{ lit: Lit::Int(lit), .. }))) => {
				lit.base10_parse::<u128>().map_err(|err| err.to_compile_error())?
			},
			Some((_, expr)) => return Err(error(syn::spanned::Spanned::span(expr), "Only integer literals are supported as flag values")),
			None => next,
		};

		if bits == 0 {
			none_ident = Some(variant.ident.clone());
			continue;
		}
		if !bits.is_power_of_two() {
			return Err(error(variant.ident.span(), "Flag values need to be a power of 2"));
		}

		next = bits << 1;
		variants.push(FlagVariant { ident: variant.ident.clone(), attrs: variant.attrs.clone(), bits });
	}
	Ok((variants, none_ident))
}

/// Bitwise operator impls, as `(trait, method, assign trait, assign method)`
const BIT_OPS : [(&str, &str, &str, &str); 3] = [
	("BitOr" , "bitor" , "BitOrAssign" , "bitor_assign" ),
	("BitAnd", "bitand", "BitAndAssign", "bitand_assign"),
	("BitXor", "bitxor", "BitXorAssign", "bitxor_assign"),
];

fn bit_op_impls(name: &Ident) -> TokenStream {
	BIT_OPS.iter().map(|(op, method, assign_op, assign_method)| {
		let [op, method, assign_op, assign_method] = [op, method, assign_op, assign_method].map(|s| Ident::new(s, Span::call_site()));
		quote!{
			impl ::core::ops::#op for #name {
				type Output = Self;
				fn #method(self, rhs: Self) -> Self {
					Self { bits: ::core::ops::#op::#method(self.bits, rhs.bits) }
				}
			}

			impl ::core::ops::#assign_op for #name {
				fn #assign_method(&mut self, rhs: Self) {
					*self = ::core::ops::#op::#method(*self, rhs);
				}
			}
		}
	}).collect()
}

pub fn flags(args: TokenStream, input: TokenStream) -> TokenStream {
	let input = match syn::parse2::<DeriveInput>(input) {
		Ok(input) => input,
		Err(err) => return err.to_compile_error(),
	};

	let (variants, none_ident) = match collect_variants(&input) {
		Ok(res) => res,
		Err(toks) => return toks,
	};

	let highest = variants.iter().map(|var| var.bits).max().unwrap_or(0);
	let base_type = match pick_base_type(args, highest) {
		Ok(ty) => ty,
		Err(toks) => return toks,
	};

	let vis = &input.vis;
	let name = &input.ident;
	let attrs = &input.attrs;

	let idents : Vec<_> = variants.iter().map(|var| &var.ident).collect();
	let var_attrs : Vec<_> = variants.iter().map(|var| &var.attrs).collect();
	let bits : Vec<_> = variants.iter().map(|var| proc_macro2::Literal::u128_unsuffixed(var.bits)).collect();

	let empty_ident = none_ident.unwrap_or_else(|| Ident::new("None", Span::call_site()));
	let empty_name = empty_ident.to_string();
	let ops = bit_op_impls(name);

	quote!{
		#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
		#(#attrs)*
		#[repr(transparent)]
		#vis struct #name {
			bits : #base_type
		}

		#[allow(non_upper_case_globals)]
		impl #name {
			/// No flag set
			#vis const #empty_ident : #name = #name::none();

			#(
				#(#var_attrs)*
				#vis const #idents : #name = #name { bits: #bits };
			)*

			#vis const fn none() -> Self {
				Self { bits: 0 }
			}

			/// Every declared flag set
			#vis const fn all() -> Self {
				Self { bits: 0 #( | #bits)* }
			}

			#vis const fn bits(&self) -> #base_type {
				self.bits
			}

			/// Check if every flag in `other` is also set in `self`
			#vis const fn contains(&self, other: #name) -> bool {
				self.bits & other.bits == other.bits
			}

			#vis const fn is_none(&self) -> bool {
				self.bits == 0
			}

			/// Enable or disable the flags in `flag`
			#vis fn set(&mut self, flag: #name, enabled: bool) {
				if enabled {
					self.enable(flag);
				} else {
					self.bits &= !flag.bits;
				}
			}

			#vis fn enable(&mut self, flag: #name) {
				self.bits |= flag.bits;
			}

			/// `|` usable in const contexts
			#vis const fn union(self, rhs: Self) -> Self {
				Self { bits: self.bits | rhs.bits }
			}
		}

		#ops

		impl ::core::fmt::Debug for #name {
			fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
				if self.is_none() {
					return f.write_str(#empty_name);
				}

				let set_names = [#((#name::#idents, stringify!(#idents))),*]
					.into_iter()
					.filter(|(flag, _)| self.contains(*flag))
					.map(|(_, name)| name);
				for (idx, flag_name) in set_names.enumerate() {
					if idx != 0 {
						f.write_str(" | ")?;
					}
					f.write_str(flag_name)?;
				}
				Ok(())
			}
		}
	}
}
