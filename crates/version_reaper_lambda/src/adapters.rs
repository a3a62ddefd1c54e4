pub mod function_catalog;
