mod common;

mod diagnosis;
mod treatment;
