mod builder;
mod serialization;
