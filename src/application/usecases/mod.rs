pub mod send_whatsapp;
