pub mod ultramsg;
