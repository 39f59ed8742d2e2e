mod api;
mod downloads;
mod pages;
