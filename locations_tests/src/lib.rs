#[cfg(test)]
mod basic;
#[cfg(test)]
mod nested;
