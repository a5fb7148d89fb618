pub mod anim;
pub mod viewmodel;
