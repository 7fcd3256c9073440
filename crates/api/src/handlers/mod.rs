pub mod contacto;
