use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::parse::Parser;

/// Generate the boilerplate for a color model: a struct with exactly three
/// public component fields, a constructor, conversions to and from
/// `Components` and an implementation of `crate::models::Model` for every
/// instantiation that has a `crate::color::HasSpace`.
#[proc_macro]
pub fn gen_model(input: TokenStream) -> TokenStream {
    let mut input = syn::parse_macro_input!(input as syn::ItemStruct);

    if input.fields.len() != 3 {
        return syn::Error::new_spanned(
            &input.ident,
            "Models must have exactly 3 fields, one for each component of the color.",
        )
        .to_compile_error()
        .into();
    }

    let field_names = input
        .fields
        .iter()
        .filter_map(|f| f.ident.clone())
        .collect::<Vec<_>>();
    if field_names.len() != 3 {
        return syn::Error::new_spanned(&input.ident, "Model fields must be named.")
            .to_compile_error()
            .into();
    }

    let field1 = &field_names[0];
    let field2 = &field_names[1];
    let field3 = &field_names[2];

    // Component fields are always public.
    input.fields.iter_mut().for_each(|f| {
        f.vis = syn::Visibility::Public(Default::default());
    });

    let derives = match syn::Attribute::parse_outer.parse2(quote! {
        #[derive(Clone, Debug)]
    }) {
        Ok(attrs) => attrs,
        Err(err) => return err.to_compile_error().into(),
    };
    input.attrs.extend(derives);

    let mut phantom_fields: Vec<syn::Ident> = vec![];

    let type_params = input
        .generics
        .params
        .iter()
        .filter_map(|g| match g {
            syn::GenericParam::Type(type_param) => Some(type_param.ident.clone()),
            _ => None,
        })
        .collect::<Vec<_>>();

    if let syn::Fields::Named(ref mut named) = input.fields {
        for ident in type_params {
            let field_name = format!("_{}", ident.to_string().to_lowercase());
            let field_name = syn::Ident::new(field_name.as_str(), Span::call_site());
            phantom_fields.push(field_name.clone());

            match syn::Field::parse_named.parse2(quote! {
                #field_name: std::marker::PhantomData<#ident>
            }) {
                Ok(field) => named.named.push(field),
                Err(err) => return err.to_compile_error().into(),
            }
        }
    }

    let struct_name = input.ident.clone();
    let (impl_gen, type_gen, _) = input.generics.split_for_impl();

    let model_impl = quote! {
        impl #impl_gen #struct_name #type_gen {
            /// Create a new color with this model.
            pub fn new(
                #field1: crate::color::Component,
                #field2: crate::color::Component,
                #field3: crate::color::Component,
            ) -> Self {
                Self {
                    #field1,
                    #field2,
                    #field3,
                    #(#phantom_fields: std::marker::PhantomData,)*
                }
            }

            /// Convert this model into generic components.
            pub fn to_components(&self) -> crate::color::Components {
                crate::color::Components(self.#field1, self.#field2, self.#field3)
            }
        }

        impl #impl_gen From<crate::color::Components> for #struct_name #type_gen {
            fn from(value: crate::color::Components) -> Self {
                Self::new(value.0, value.1, value.2)
            }
        }

        impl #impl_gen crate::models::Model for #struct_name #type_gen
        where
            Self: crate::color::HasSpace,
        {
            fn to_color(&self, alpha: Option<crate::color::Component>) -> crate::color::Color {
                crate::color::Color::new(
                    <Self as crate::color::HasSpace>::SPACE,
                    if self.#field1.is_nan() { None } else { Some(self.#field1) },
                    if self.#field2.is_nan() { None } else { Some(self.#field2) },
                    if self.#field3.is_nan() { None } else { Some(self.#field3) },
                    alpha,
                )
            }

            fn from_color(color: &crate::color::Color) -> Self {
                Self::new(color.components.0, color.components.1, color.components.2)
            }
        }
    };

    quote! {
        #input
        #model_impl
    }
    .into()
}
