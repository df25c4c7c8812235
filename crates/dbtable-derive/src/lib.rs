//! Derive macros for dbtable row and filter models.
//!
//! This crate provides `#[derive(Table)]` for row models and
//! `#[derive(Filter)]` for query filter models. The macros are the field
//! classifier: they fix, at compile time, the ordered list of mapped
//! columns and (for row models) the primary key column that the statement
//! generators in `dbtable-core` consume.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{
    Attribute, Data, DeriveInput, Expr, Field, Fields, Lit, Meta, Type, parse_macro_input, token,
};

/// Derives the `TableModel` trait for a row model struct.
///
/// # Attributes
///
/// - `#[table(name = "TableName")]` — the SQL table name (optional,
///   defaults to the struct name verbatim)
///
/// # Field Attributes
///
/// - `#[column(primary_key)]` — marks the field as the primary key
///   (at most one per struct)
/// - `#[column(name = "ColumnName")]` — the SQL column name (optional,
///   defaults to the field name verbatim)
/// - `#[column(skip)]` — excludes the field from column mapping; the
///   field is filled from `Default` during row materialization
///
/// Mapped column order is field declaration order.
#[proc_macro_derive(Table, attributes(table, column))]
pub fn derive_table(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_table_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derives the `FilterModel` trait for a query filter struct.
///
/// Every mapped field must be an `Option<_>` so that an unset field is
/// distinguishable from a real zero/false/empty value. The same
/// `#[column(name = "...")]` and `#[column(skip)]` attributes apply.
#[proc_macro_derive(Filter, attributes(column))]
pub fn derive_filter(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_filter_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

struct ColumnInfo {
    field_ident: syn::Ident,
    field_type: Type,
    column_name: String,
    is_primary_key: bool,
}

fn derive_table_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let table_name = get_table_name(&input.attrs, struct_name)?;
    let fields = named_fields(&input)?;

    let mut mapped: Vec<ColumnInfo> = Vec::new();
    let mut skipped: Vec<syn::Ident> = Vec::new();

    for field in fields {
        let field_ident = field.ident.clone().unwrap();
        let attrs = parse_column_attrs(&field.attrs)?;

        if attrs.skip {
            if attrs.primary_key {
                return Err(syn::Error::new_spanned(
                    field,
                    "a skipped field cannot be the primary key",
                ));
            }
            skipped.push(field_ident);
            continue;
        }

        mapped.push(ColumnInfo {
            column_name: attrs.name.unwrap_or_else(|| field_ident.to_string()),
            field_ident,
            field_type: field.ty.clone(),
            is_primary_key: attrs.primary_key,
        });
    }

    let primary_keys: Vec<&ColumnInfo> = mapped.iter().filter(|c| c.is_primary_key).collect();
    if primary_keys.len() > 1 {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "at most one field may be marked #[column(primary_key)]",
        ));
    }
    let primary_key = primary_keys.first().copied();

    let column_names: Vec<&str> = mapped.iter().map(|c| c.column_name.as_str()).collect();
    let field_idents: Vec<&syn::Ident> = mapped.iter().map(|c| &c.field_ident).collect();

    let primary_key_const = match primary_key {
        Some(pk) => {
            let name = &pk.column_name;
            quote! { Some(#name) }
        }
        None => quote! { None },
    };

    let primary_key_value = match primary_key {
        Some(pk) => {
            let ident = &pk.field_ident;
            quote! {
                Some(::dbtable_core::value::ToSqlValue::to_sql_value(self.#ident.clone()))
            }
        }
        None => quote! { None },
    };

    let assign_primary_key = match primary_key {
        Some(pk) => {
            let ident = &pk.field_ident;
            let ty = &pk.field_type;
            quote! {
                self.#ident =
                    <#ty as ::dbtable_core::value::FromSqlValue>::from_sql_value(value)?;
                Ok(())
            }
        }
        None => quote! {
            let _ = value;
            Ok(())
        },
    };

    let from_row_fields: Vec<TokenStream2> = mapped
        .iter()
        .map(|info| {
            let ident = &info.field_ident;
            let ty = &info.field_type;
            let column = &info.column_name;
            quote! {
                #ident: match row.get(#column) {
                    Some(value) => {
                        <#ty as ::dbtable_core::value::FromSqlValue>::from_sql_value(value)?
                    }
                    None => {
                        return Err(::dbtable_core::value::ValueError::MissingColumn(#column));
                    }
                },
            }
        })
        .collect();

    let from_row_skipped: Vec<TokenStream2> = skipped
        .iter()
        .map(|ident| quote! { #ident: ::core::default::Default::default(), })
        .collect();

    let expanded = quote! {
        impl ::dbtable_core::schema::TableModel for #struct_name {
            const TABLE: &'static str = #table_name;
            const COLUMNS: &'static [&'static str] = &[#(#column_names),*];
            const PRIMARY_KEY: Option<&'static str> = #primary_key_const;

            fn values(&self) -> Vec<::dbtable_core::value::SqlValue> {
                vec![
                    #(::dbtable_core::value::ToSqlValue::to_sql_value(
                        self.#field_idents.clone()
                    )),*
                ]
            }

            fn primary_key_value(&self) -> Option<::dbtable_core::value::SqlValue> {
                #primary_key_value
            }

            fn assign_primary_key(
                &mut self,
                value: &::dbtable_core::value::SqlValue,
            ) -> Result<(), ::dbtable_core::value::ValueError> {
                #assign_primary_key
            }

            fn from_row(
                row: &::dbtable_core::row::Row,
            ) -> Result<Self, ::dbtable_core::value::ValueError> {
                Ok(Self {
                    #(#from_row_fields)*
                    #(#from_row_skipped)*
                })
            }
        }
    };

    Ok(expanded)
}

fn derive_filter_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let fields = named_fields(&input)?;

    let mut mapped: Vec<(syn::Ident, String)> = Vec::new();

    for field in fields {
        let field_ident = field.ident.clone().unwrap();
        let attrs = parse_column_attrs(&field.attrs)?;

        if attrs.skip {
            continue;
        }
        if attrs.primary_key {
            return Err(syn::Error::new_spanned(
                field,
                "primary_key is not meaningful on a filter model",
            ));
        }
        if !is_option(&field.ty) {
            return Err(syn::Error::new_spanned(
                field,
                "filter model fields must be Option<_> so that unset is distinguishable",
            ));
        }

        let column_name = attrs.name.unwrap_or_else(|| field_ident.to_string());
        mapped.push((field_ident, column_name));
    }

    let column_names: Vec<&str> = mapped.iter().map(|(_, name)| name.as_str()).collect();
    let predicate_entries: Vec<TokenStream2> = mapped
        .iter()
        .map(|(ident, name)| {
            quote! {
                (
                    #name,
                    ::dbtable_core::value::ToSqlValue::to_sql_value(self.#ident.clone()),
                )
            }
        })
        .collect();

    let expanded = quote! {
        impl ::dbtable_core::schema::FilterModel for #struct_name {
            const COLUMNS: &'static [&'static str] = &[#(#column_names),*];

            fn predicates(&self) -> Vec<(&'static str, ::dbtable_core::value::SqlValue)> {
                vec![#(#predicate_entries),*]
            }
        }
    };

    Ok(expanded)
}

fn named_fields(input: &DeriveInput) -> syn::Result<&Punctuated<Field, token::Comma>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                input,
                "derive only supports structs with named fields",
            )),
        },
        _ => Err(syn::Error::new_spanned(input, "derive only supports structs")),
    }
}

struct ColumnAttrs {
    name: Option<String>,
    primary_key: bool,
    skip: bool,
}

fn get_table_name(attrs: &[Attribute], struct_name: &syn::Ident) -> syn::Result<String> {
    for attr in attrs {
        if attr.path().is_ident("table") {
            let mut table_name = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: Expr = meta.value()?.parse()?;
                    if let Expr::Lit(lit) = value {
                        if let Lit::Str(s) = lit.lit {
                            table_name = Some(s.value());
                        }
                    }
                }
                Ok(())
            })?;
            if let Some(name) = table_name {
                return Ok(name);
            }
        }
    }
    // The table name defaults to the type's own name, matching how the
    // accessor derives table identity from the row model type.
    Ok(struct_name.to_string())
}

fn parse_column_attrs(attrs: &[Attribute]) -> syn::Result<ColumnAttrs> {
    let mut result = ColumnAttrs {
        name: None,
        primary_key: false,
        skip: false,
    };

    for attr in attrs {
        if attr.path().is_ident("column") {
            // Tolerate a bare #[column] with no arguments.
            if matches!(attr.meta, Meta::Path(_)) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("primary_key") {
                    result.primary_key = true;
                } else if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("name") {
                    let value: Expr = meta.value()?.parse()?;
                    if let Expr::Lit(lit) = value {
                        if let Lit::Str(s) = lit.lit {
                            result.name = Some(s.value());
                        }
                    }
                }
                Ok(())
            })?;
        }
    }

    Ok(result)
}

fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn table_rejects_duplicate_primary_keys() {
        let input: DeriveInput = parse_quote! {
            struct Person {
                #[column(primary_key)]
                id: i64,
                #[column(primary_key)]
                other_id: i64,
            }
        };

        let err = derive_table_impl(input).unwrap_err();
        assert!(err.to_string().contains("at most one field"));
    }

    #[test]
    fn table_rejects_skipped_primary_key() {
        let input: DeriveInput = parse_quote! {
            struct Person {
                #[column(primary_key, skip)]
                id: i64,
            }
        };

        let err = derive_table_impl(input).unwrap_err();
        assert!(err
            .to_string()
            .contains("skipped field cannot be the primary key"));
    }

    #[test]
    fn table_rejects_tuple_structs() {
        let input: DeriveInput = parse_quote! {
            struct Person(i64, String);
        };

        let err = derive_table_impl(input).unwrap_err();
        assert!(err.to_string().contains("named fields"));
    }

    #[test]
    fn table_maps_columns_in_declaration_order() {
        let input: DeriveInput = parse_quote! {
            #[table(name = "Person")]
            struct Person {
                #[column(primary_key, name = "Id")]
                id: Option<i64>,
                #[column(name = "Name")]
                name: String,
                age: i64,
                #[column(skip)]
                cache: String,
            }
        };

        let tokens = derive_table_impl(input).unwrap().to_string();
        let compact = tokens.replace(' ', "");
        assert!(compact.contains(r#"TABLE:&'staticstr="Person""#));
        assert!(compact.contains(r#"&["Id","Name","age"]"#));
        assert!(compact.contains(r#"Some("Id")"#));
    }

    #[test]
    fn filter_rejects_non_option_field() {
        let input: DeriveInput = parse_quote! {
            struct PersonFilter {
                #[column(name = "Name")]
                name: String,
            }
        };

        let err = derive_filter_impl(input).unwrap_err();
        assert!(err.to_string().contains("must be Option"));
    }

    #[test]
    fn filter_rejects_primary_key_attribute() {
        let input: DeriveInput = parse_quote! {
            struct PersonFilter {
                #[column(primary_key)]
                id: Option<i64>,
            }
        };

        let err = derive_filter_impl(input).unwrap_err();
        assert!(err.to_string().contains("not meaningful"));
    }

    #[test]
    fn filter_accepts_all_option_fields() {
        let input: DeriveInput = parse_quote! {
            struct PersonFilter {
                #[column(name = "Name")]
                name: Option<String>,
                age: Option<i64>,
            }
        };

        let tokens = derive_filter_impl(input).unwrap().to_string();
        let compact = tokens.replace(' ', "");
        assert!(compact.contains(r#"&["Name","age"]"#));
    }
}
