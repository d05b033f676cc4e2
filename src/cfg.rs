#[doc(hidden)]
#[macro_export]
macro_rules! cfg_smallvec {
    ($($item:item)*) => {
        $( #[cfg(feature = "smallvec")] $item )*
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! cfg_not_smallvec {
    ($($item:item)*) => {
        $( #[cfg(not(feature = "smallvec"))] $item )*
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! cfg_derive {
    ($($item:item)*) => {
        $( #[cfg(feature = "derive")] $item )*
    }
}
