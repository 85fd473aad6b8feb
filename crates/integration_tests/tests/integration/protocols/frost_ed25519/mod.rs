mod keygen;
mod refresh;
mod sign;
