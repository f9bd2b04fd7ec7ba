mod location;
mod serde_attrs;

use crate::location::Location;

use proc_macro2::token_stream::TokenStream;

pub fn derive_location(input: TokenStream) -> TokenStream {
    let input = match syn::parse2::<syn::DeriveInput>(input) {
        Ok(input) => input,
        Err(err) => return err.into_compile_error(),
    };

    match Location::parse(input) {
        Ok(location) => location::implement(&location),
        Err(err) => err.into_compile_error(),
    }
}
