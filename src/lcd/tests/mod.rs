mod configure_test;
mod fixture;
