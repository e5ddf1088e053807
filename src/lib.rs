pub mod script_compiler;
