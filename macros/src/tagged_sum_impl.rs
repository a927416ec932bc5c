use std::collections::HashSet;

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote, ToTokens};
use syn::{
    parse2, parse_quote, Attribute, Data, DeriveInput, Fields, GenericParam, Generics, Ident,
    LitStr, Path, Result, Type, Variant, Visibility,
};

use crate::syn_utils::{contains_ident, to_snake_case};

pub fn derive_tagged_sum(input: TokenStream) -> Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let sum = SumInput::new(&input)?;

    let mut ts = sum.impl_tagged_sum();
    ts.extend(sum.impl_cata());
    if let Some(success) = &sum.success {
        ts.extend(sum.impl_success(success));
    }
    if sum.args.values {
        ts.extend(sum.impl_values());
    }
    if sum.args.serde {
        ts.extend(sum.impl_serialize());
        ts.extend(sum.impl_deserialize());
    }
    Ok(ts)
}

#[derive(Default)]
struct SumArgs {
    name: Option<LitStr>,
    cata: Option<Ident>,
    crate_path: Option<Path>,
    serde: bool,
    values: bool,
}
impl SumArgs {
    fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut args = Self::default();
        for attr in attrs {
            if !attr.path().is_ident("sum") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    args.name = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("cata") {
                    args.cata = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("crate") {
                    let path: LitStr = meta.value()?.parse()?;
                    args.crate_path = Some(path.parse()?);
                } else if meta.path.is_ident("serde") {
                    args.serde = true;
                } else if meta.path.is_ident("values") {
                    args.values = true;
                } else {
                    return Err(meta.error("unknown `sum` attribute on enum"));
                }
                Ok(())
            })?;
        }
        Ok(args)
    }
}

#[derive(Default)]
struct VariantArgs {
    rename: Option<LitStr>,
    success: bool,
}
impl VariantArgs {
    fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut args = Self::default();
        for attr in attrs {
            if !attr.path().is_ident("sum") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    args.rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("success") {
                    args.success = true;
                } else {
                    return Err(meta.error("unknown `sum` attribute on variant"));
                }
                Ok(())
            })?;
        }
        Ok(args)
    }
}

struct SumInput<'a> {
    ident: &'a Ident,
    vis: &'a Visibility,
    generics: &'a Generics,
    args: SumArgs,
    name: String,
    cata: Ident,
    c: TokenStream,
    variants: Vec<VariantInput<'a>>,
    success: Option<Success>,
}

struct Success {
    index: usize,
    param: Ident,
}

struct VariantInput<'a> {
    ident: &'a Ident,
    tag: String,
    handler: Ident,
    handler_param: Ident,
    is_unit: bool,
    fields: Vec<&'a Type>,
}

impl<'a> SumInput<'a> {
    fn new(input: &'a DeriveInput) -> Result<Self> {
        let Data::Enum(data) = &input.data else {
            bail!(
                input.ident.span(),
                "`TaggedSum` can only be derived for enums"
            );
        };
        let args = SumArgs::from_attrs(&input.attrs)?;
        let name = match &args.name {
            Some(name) => name.value(),
            None => input.ident.to_string(),
        };
        let cata = match &args.cata {
            Some(cata) => cata.clone(),
            None => format_ident!("{}Cata", input.ident),
        };
        let c = match &args.crate_path {
            Some(path) => path.to_token_stream(),
            None => quote!(::tagsum),
        };

        let mut variants = Vec::new();
        let mut success_index = None;
        let mut tags = HashSet::new();
        let mut handlers = HashSet::new();
        for (index, variant) in data.variants.iter().enumerate() {
            let (v, is_success) = VariantInput::new(variant)?;
            if !tags.insert(v.tag.clone()) {
                bail!(variant.ident.span(), "duplicate tag name `{}`", v.tag);
            }
            if !handlers.insert(v.handler.to_string()) {
                bail!(
                    variant.ident.span(),
                    "handler name `{}` is used by more than one tag",
                    v.handler
                );
            }
            if is_success {
                if success_index.is_some() {
                    bail!(variant.ident.span(), "only one tag can be marked `success`");
                }
                success_index = Some(index);
            }
            variants.push(v);
        }

        let mut this = Self {
            ident: &input.ident,
            vis: &input.vis,
            generics: &input.generics,
            args,
            name,
            cata,
            c,
            variants,
            success: None,
        };
        if let Some(index) = success_index {
            this.success = Some(this.success_param(index, &data.variants[index])?);
        }
        Ok(this)
    }

    fn success_param(&self, index: usize, variant: &Variant) -> Result<Success> {
        let v = &self.variants[index];
        let param = match v.fields.as_slice() {
            [Type::Path(ty)] if ty.qself.is_none() => ty.path.get_ident().cloned(),
            _ => None,
        };
        let Some(param) = param.filter(|p| self.generics.type_params().any(|t| &t.ident == p))
        else {
            bail!(
                variant.ident.span(),
                "the success tag must carry exactly one value of a type parameter"
            );
        };
        let tp = self
            .generics
            .type_params()
            .find(|t| t.ident == param)
            .map(|t| !t.bounds.is_empty() || t.default.is_some());
        if tp == Some(true) {
            bail!(
                param.span(),
                "the success type parameter `{}` cannot have bounds or a default",
                param
            );
        }
        if let Some(wc) = &self.generics.where_clause {
            if contains_ident(wc.to_token_stream(), &param) {
                bail!(
                    param.span(),
                    "the success type parameter `{}` cannot appear in the where clause",
                    param
                );
            }
        }
        for (i, other) in self.variants.iter().enumerate() {
            if i != index
                && other
                    .fields
                    .iter()
                    .any(|ty| contains_ident(ty.to_token_stream(), &param))
            {
                bail!(
                    other.ident.span(),
                    "the success type parameter `{}` cannot appear in tag `{}`",
                    param,
                    other.tag
                );
            }
        }
        Ok(Success { index, param })
    }

    fn impl_tagged_sum(&self) -> TokenStream {
        let c = &self.c;
        let ident = self.ident;
        let name = &self.name;
        let (impl_g, ty_g, where_c) = self.generics.split_for_impl();
        let tags = self.variants.iter().map(|v| {
            let tag = &v.tag;
            let arity = v.fields.len();
            quote!(#c::TagDef { name: #tag, arity: #arity })
        });
        let arms = self.variants.iter().enumerate().map(|(index, v)| {
            let pat = v.pat_ignore();
            quote!(#pat => #index)
        });
        quote! {
            #[automatically_derived]
            impl #impl_g #c::TaggedSum for #ident #ty_g #where_c {
                const DEF: #c::SumDef = #c::SumDef {
                    name: #name,
                    tags: &[#(#tags),*],
                };
                fn tag_index(&self) -> usize {
                    match *self {
                        #(#arms,)*
                    }
                }
            }
        }
    }

    fn impl_cata(&self) -> TokenStream {
        let ident = self.ident;
        let vis = self.vis;
        let cata = &self.cata;
        let (impl_g, ty_g, where_c) = self.generics.split_for_impl();
        let params: Vec<_> = self.variants.iter().map(|v| &v.handler_param).collect();
        let mut slot_count: usize = 0;
        let slots: Vec<Vec<Ident>> = self
            .variants
            .iter()
            .map(|v| {
                v.fields
                    .iter()
                    .map(|_| {
                        slot_count += 1;
                        format_ident!("__T{}", slot_count - 1)
                    })
                    .collect()
            })
            .collect();
        let slot_params: Vec<&Ident> = slots.iter().flatten().collect();
        let doc = format!(
            "Handlers for [`{ident}::cata`] and [`{ident}::cata_ref`], one per tag of `{}`.\n\n\
             Build it with the `cata!` macro, which fills in the marker field.",
            self.name
        );
        let fields = self.variants.iter().map(|v| {
            let handler = &v.handler;
            let param = &v.handler_param;
            let doc = format!("Handler for the `{}` tag.", v.tag);
            quote!(#[doc = #doc] pub #handler: #param)
        });
        let slot_bounds = self.variants.iter().zip(&slots).map(|(v, slots)| {
            let param = &v.handler_param;
            quote!(#param: ::core::ops::FnOnce(#(#slots),*) -> __R)
        });
        let by_value = self.variants.iter().map(|v| {
            let param = &v.handler_param;
            let tys = &v.fields;
            quote!(#param: ::core::ops::FnOnce(#(#tys),*) -> __R)
        });
        let by_ref = self.variants.iter().map(|v| {
            let param = &v.handler_param;
            let tys = &v.fields;
            quote!(#param: ::core::ops::FnOnce(#(&'__a #tys),*) -> __R)
        });
        let value_tys = self.variants.iter().flat_map(|v| &v.fields);
        let ref_tys = value_tys.clone().map(|ty| quote!(&'__a #ty));
        let arms: Vec<_> = self
            .variants
            .iter()
            .map(|v| {
                let pat = v.pat_bind(quote!(Self));
                let handler = &v.handler;
                let binds = v.binds();
                quote!(#pat => (handlers.#handler)(#(#binds),*))
            })
            .collect();
        let by_ref_self = self.scrutinee_ref();
        quote! {
            #[doc = #doc]
            #vis struct #cata<#(#slot_params,)* __R, #(#params),*>
            where
                #(#slot_bounds,)*
            {
                #(#fields,)*
                #[doc(hidden)]
                pub __phantom: ::core::marker::PhantomData<fn(#(#slot_params),*) -> __R>,
            }

            #[automatically_derived]
            impl #impl_g #ident #ty_g #where_c {
                /// Consumes `self` and returns the result of the handler for its tag,
                /// called with the tag's payload as positional arguments.
                #vis fn cata<__R, #(#params),*>(
                    self,
                    handlers: #cata<#(#value_tys,)* __R, #(#params),*>,
                ) -> __R
                where
                    #(#by_value,)*
                {
                    match self {
                        #(#arms,)*
                    }
                }

                /// Like `cata`, but passes the payload by reference.
                #vis fn cata_ref<'__a, __R, #(#params),*>(
                    &'__a self,
                    handlers: #cata<#(#ref_tys,)* __R, #(#params),*>,
                ) -> __R
                where
                    #(#by_ref,)*
                {
                    match #by_ref_self {
                        #(#arms,)*
                    }
                }
            }
        }
    }

    fn impl_success(&self, success: &Success) -> TokenStream {
        let ident = self.ident;
        let vis = self.vis;
        let cata = &self.cata;
        let d = &success.param;
        let (impl_g, ty_g, where_c) = self.generics.split_for_impl();
        let mapped = self.ty_with(d, quote!(__B));
        let inner = self.ty_with(d, quote!(__I));
        let nested = self.ty_with(d, inner.clone());
        let success_tag = &self.variants[success.index];
        let success_doc = format!(
            "Applies `f` to the payload of the `{}` tag. Every other tag keeps its payload.",
            success_tag.tag
        );
        let flatten_doc = format!(
            "Collapses a nested `{}` tag into the inner instance. Every other tag keeps its payload.",
            success_tag.tag
        );

        let map_handlers = self.variants.iter().enumerate().map(|(i, v)| {
            let handler = &v.handler;
            if i == success.index {
                let ctor = v.ctor(quote!(#ident), quote!(f(_0)));
                quote!(#handler: |_0| #ctor)
            } else {
                let binds = v.binds();
                let ctor = v.ctor(quote!(#ident), quote!(#(#binds),*));
                quote!(#handler: |#(#binds),*| #ctor)
            }
        });
        let flatten_handlers = self.variants.iter().enumerate().map(|(i, v)| {
            let handler = &v.handler;
            if i == success.index {
                quote!(#handler: |_0| _0)
            } else {
                let binds = v.binds();
                let ctor = v.ctor(quote!(#ident), quote!(#(#binds),*));
                quote!(#handler: |#(#binds),*| #ctor)
            }
        });
        let flatten_params = self.generics.params.iter().map(|p| match p {
            GenericParam::Type(t) if &t.ident == d => quote!(__I),
            GenericParam::Type(t) => {
                let mut t = t.clone();
                t.eq_token = None;
                t.default = None;
                quote!(#t)
            }
            GenericParam::Const(cp) => {
                let mut cp = cp.clone();
                cp.eq_token = None;
                cp.default = None;
                quote!(#cp)
            }
            GenericParam::Lifetime(l) => quote!(#l),
        });

        quote! {
            #[automatically_derived]
            impl #impl_g #ident #ty_g #where_c {
                #[doc = #success_doc]
                #vis fn map<__B, __F>(self, f: __F) -> #mapped
                where
                    __F: ::core::ops::FnOnce(#d) -> __B,
                {
                    self.cata(#cata {
                        #(#map_handlers,)*
                        __phantom: ::core::marker::PhantomData,
                    })
                }

                /// `map` followed by `flatten`.
                #vis fn flat_map<__B, __F>(self, f: __F) -> #mapped
                where
                    __F: ::core::ops::FnOnce(#d) -> #mapped,
                {
                    self.map(f).flatten()
                }
            }

            #[automatically_derived]
            impl<#(#flatten_params),*> #nested #where_c {
                #[doc = #flatten_doc]
                #vis fn flatten(self) -> #inner {
                    self.cata(#cata {
                        #(#flatten_handlers,)*
                        __phantom: ::core::marker::PhantomData,
                    })
                }
            }
        }
    }

    fn impl_values(&self) -> TokenStream {
        let c = &self.c;
        let ident = self.ident;
        let generics = self.bounded(quote!(::core::fmt::Debug));
        let (impl_g, _, where_c) = generics.split_for_impl();
        let (_, ty_g, _) = self.generics.split_for_impl();
        let arms = self.variants.iter().map(|v| {
            let pat = v.pat_bind(quote!(Self));
            let binds = v.binds();
            quote!(#pat => ::std::vec![#(#binds as &dyn ::core::fmt::Debug),*])
        });
        let scrutinee = self.scrutinee_ref();
        quote! {
            #[automatically_derived]
            impl #impl_g #c::SumValues for #ident #ty_g #where_c {
                fn values(&self) -> ::std::vec::Vec<&dyn ::core::fmt::Debug> {
                    match #scrutinee {
                        #(#arms,)*
                    }
                }
            }
        }
    }

    fn impl_serialize(&self) -> TokenStream {
        let c = &self.c;
        let ident = self.ident;
        let generics = self.bounded(quote!(#c::__private::serde::Serialize));
        let (impl_g, _, where_c) = generics.split_for_impl();
        let (_, ty_g, _) = self.generics.split_for_impl();

        let mut values_decl = self.generics.clone();
        values_decl.params.insert(0, parse_quote!('__a));
        let (values_decl_g, values_ty_g, values_decl_where) = values_decl.split_for_impl();
        let mut values_impl = generics.clone();
        values_impl.params.insert(0, parse_quote!('__a));
        let (values_impl_g, _, values_impl_where) = values_impl.split_for_impl();

        let arms = self.variants.iter().map(|v| {
            let pat = v.pat_bind(quote!(#ident));
            let binds = v.binds();
            let arity = binds.len();
            let seq = if binds.is_empty() {
                quote!(seq)
            } else {
                quote!(mut seq)
            };
            quote! {
                #pat => {
                    let #seq = __S::serialize_seq(serializer, ::core::option::Option::Some(#arity))?;
                    #(#c::__private::serde::ser::SerializeSeq::serialize_element(&mut seq, #binds)?;)*
                    #c::__private::serde::ser::SerializeSeq::end(seq)
                }
            }
        });
        let scrutinee = if self.variants.is_empty() {
            quote!(*self.0)
        } else {
            quote!(self.0)
        };
        quote! {
            const _: () = {
                struct __TaggedValues #values_decl_g (&'__a #ident #ty_g) #values_decl_where;

                #[automatically_derived]
                impl #values_impl_g #c::__private::serde::Serialize for __TaggedValues #values_ty_g
                #values_impl_where
                {
                    fn serialize<__S>(
                        &self,
                        serializer: __S,
                    ) -> ::core::result::Result<__S::Ok, __S::Error>
                    where
                        __S: #c::__private::serde::Serializer,
                    {
                        match #scrutinee {
                            #(#arms,)*
                        }
                    }
                }

                #[automatically_derived]
                impl #impl_g #c::__private::serde::Serialize for #ident #ty_g #where_c {
                    fn serialize<__S>(
                        &self,
                        serializer: __S,
                    ) -> ::core::result::Result<__S::Ok, __S::Error>
                    where
                        __S: #c::__private::serde::Serializer,
                    {
                        #c::__private::serialize_record(
                            serializer,
                            <Self as #c::TaggedSum>::DEF.name,
                            #c::TaggedSum::tag(self),
                            &__TaggedValues(self),
                        )
                    }
                }
            };
        }
    }

    fn impl_deserialize(&self) -> TokenStream {
        let c = &self.c;
        let ident = self.ident;
        let mut generics = self.bounded(quote!(#c::__private::serde::Deserialize<'de>));
        generics.params.insert(0, parse_quote!('de));
        let (impl_g, _, where_c) = generics.split_for_impl();
        let (_, ty_g, _) = self.generics.split_for_impl();
        let arms = self.variants.iter().enumerate().map(|(index, v)| {
            let values = (0..v.fields.len()).map(|position| {
                quote!(#c::__private::next_value::<Self, _, __A>(&mut seq, #index, #position)?)
            });
            let ctor = v.ctor(quote!(Self), quote!(#(#values),*));
            quote!(#index => #ctor)
        });
        quote! {
            #[automatically_derived]
            impl #impl_g #c::SumDecode<'de> for #ident #ty_g #where_c {
                #[allow(unreachable_code)]
                fn decode_values<__A>(
                    index: usize,
                    mut seq: __A,
                ) -> ::core::result::Result<Self, __A::Error>
                where
                    __A: #c::__private::serde::de::SeqAccess<'de>,
                {
                    let value = match index {
                        #(#arms,)*
                        _ => {
                            return ::core::result::Result::Err(
                                #c::__private::invalid_index::<Self, __A::Error>(index),
                            )
                        }
                    };
                    #c::__private::end_values::<Self, __A>(&mut seq, index)?;
                    ::core::result::Result::Ok(value)
                }
            }

            #[automatically_derived]
            impl #impl_g #c::__private::serde::Deserialize<'de> for #ident #ty_g #where_c {
                fn deserialize<__D>(deserializer: __D) -> ::core::result::Result<Self, __D::Error>
                where
                    __D: #c::__private::serde::Deserializer<'de>,
                {
                    #c::__private::deserialize_record(deserializer)
                }
            }
        }
    }

    /// `self` for matching by reference; `*self` when there are no tags, since an empty
    /// match on a reference is not exhaustive.
    fn scrutinee_ref(&self) -> TokenStream {
        if self.variants.is_empty() {
            quote!(*self)
        } else {
            quote!(self)
        }
    }

    fn bounded(&self, bound: TokenStream) -> Generics {
        let mut generics = self.generics.clone();
        let params: Vec<Ident> = generics.type_params().map(|t| t.ident.clone()).collect();
        let wc = generics.make_where_clause();
        for p in params {
            wc.predicates.push(parse_quote!(#p: #bound));
        }
        generics
    }

    fn ty_with(&self, param: &Ident, replacement: TokenStream) -> TokenStream {
        let ident = self.ident;
        let args = self.generics.params.iter().map(|p| match p {
            GenericParam::Type(t) if &t.ident == param => replacement.clone(),
            GenericParam::Type(t) => t.ident.to_token_stream(),
            GenericParam::Const(cp) => cp.ident.to_token_stream(),
            GenericParam::Lifetime(l) => l.lifetime.to_token_stream(),
        });
        quote!(#ident<#(#args),*>)
    }
}

impl<'a> VariantInput<'a> {
    fn new(variant: &'a Variant) -> Result<(Self, bool)> {
        let args = VariantArgs::from_attrs(&variant.attrs)?;
        let (is_unit, fields) = match &variant.fields {
            Fields::Unit => (true, Vec::new()),
            Fields::Unnamed(fields) => (false, fields.unnamed.iter().map(|f| &f.ty).collect()),
            Fields::Named(_) => bail!(
                variant.ident.span(),
                "tag `{}` must use positional fields",
                variant.ident
            ),
        };
        let tag = match &args.rename {
            Some(rename) => rename.value(),
            None => variant.ident.to_string(),
        };
        let this = Self {
            ident: &variant.ident,
            handler: handler_ident(&tag, variant.ident.span())?,
            handler_param: format_ident!("F{}", variant.ident),
            tag,
            is_unit,
            fields,
        };
        Ok((this, args.success))
    }

    fn binds(&self) -> Vec<Ident> {
        (0..self.fields.len()).map(|i| format_ident!("_{}", i)).collect()
    }

    fn pat_ignore(&self) -> TokenStream {
        let ident = self.ident;
        if self.is_unit {
            quote!(Self::#ident)
        } else {
            quote!(Self::#ident(..))
        }
    }

    fn pat_bind(&self, prefix: TokenStream) -> TokenStream {
        let binds = self.binds();
        self.ctor(prefix, quote!(#(#binds),*))
    }

    fn ctor(&self, prefix: TokenStream, values: TokenStream) -> TokenStream {
        let ident = self.ident;
        if self.is_unit {
            quote!(#prefix::#ident)
        } else {
            quote!(#prefix::#ident(#values))
        }
    }
}

fn handler_ident(tag: &str, span: Span) -> Result<Ident> {
    let mut name: String = to_snake_case(tag)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if name.is_empty() || name == "__phantom" {
        bail!(span, "tag `{}` does not map to a valid handler name", tag);
    }
    if matches!(name.as_str(), "self" | "super" | "crate" | "_") {
        name.push('_');
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    match syn::parse_str::<Ident>(&name) {
        Ok(_) => Ok(Ident::new(&name, span)),
        Err(_) => Ok(Ident::new_raw(&name, span)),
    }
}
