mod batch;
mod common;
mod fusion;
mod routing;
