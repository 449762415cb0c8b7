pub mod contact_ops;
