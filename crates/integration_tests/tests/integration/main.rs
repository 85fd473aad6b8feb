mod concurrent;
mod protocols;
