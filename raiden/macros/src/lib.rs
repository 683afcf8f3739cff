//! Derive macros wiring state changes and events into their enclosing unions.
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
	parse_macro_input,
	DeriveInput,
	Ident,
};

/// Generate the conversions between a variant payload and its union.
///
/// The union must have a tuple variant named after the payload type.
fn union_conversions(name: &Ident, union: TokenStream2) -> TokenStream {
	let expanded = quote! {
		impl From<#name> for #union {
			fn from(inner: #name) -> Self {
				#union::#name(inner)
			}
		}

		impl TryFrom<#union> for #name {
			type Error = #union;

			fn try_from(value: #union) -> Result<Self, Self::Error> {
				match value {
					#union::#name(inner) => Ok(inner),
					other => Err(other),
				}
			}
		}
	};

	TokenStream::from(expanded)
}

/// Derive macro to convert input into an Event.
#[proc_macro_derive(IntoEvent)]
pub fn into_event(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	union_conversions(&input.ident, quote!(Event))
}

/// Derive macro to convert input into a state change.
#[proc_macro_derive(IntoStateChange)]
pub fn into_state_change(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	union_conversions(&input.ident, quote!(StateChange))
}
