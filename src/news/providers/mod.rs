pub mod newsapi;

pub use newsapi::NewsApiProvider;
