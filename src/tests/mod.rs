mod adhash;
mod scalar;
