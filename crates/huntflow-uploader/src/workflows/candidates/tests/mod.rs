mod common;
mod reference;
