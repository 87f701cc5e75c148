macro_rules! emit {
    ($ctx:expr) => {
        {
            {
                // Pretend to use the arg
                let _ctx = &$ctx;
            }
            Ok(())
        }
    };
    ($ctx:expr, ) => {
        {
            emit!($ctx)
        }
    };
    ($ctx:expr, ; $($rest:tt)* ) => {
        {
            $ctx.endl()?;
            emit!($ctx, $($rest)*)
        }
    };
    ($ctx:expr, $lit:literal % ( $($expr:expr),* $(,)? ) $( ; $($rest:tt)* )?) => {
        {
            let Emitter { lang, indent, .. } = *$ctx;
            $ctx.append(format_args!($lit, $( EmitToken { lang, indent, inner: $expr } ),*))?;
            emit!($ctx, $( ; $($rest)* )?)
        }
    };
    ($ctx:expr, $lit:literal % $expr:expr $( ; $($rest:tt)* )?) => {
        {
            emit!($ctx, $lit % ($expr))?;
            emit!($ctx, $( ; $($rest)* )?)
        }
    };
    ($ctx:expr, $lit:literal $( ; $($rest:tt)* )?) => {
        {
            $ctx.append($lit)?;
            emit!($ctx, $( ; $($rest)* )?)
        }
    };
    ($ctx:expr, $ident:ident $( ; $($rest:tt)* )?) => {
        {
            emit!($ctx, ( $ident ) $( ; $($rest)* )?)
        }
    };
    ($ctx:expr, ({ $($body:tt)* }) ; $($rest:tt)*) => {
        {
            $ctx.block_begin()?;
            emit!($ctx, $($body)*)?;
            $ctx.block_end()?;
            emit!($ctx, $($rest)*)
        }
    };
    ($ctx:expr, () $( ; $($rest:tt)* )?) => {
        {
            emit!($ctx, $( ; $($rest)* )?)
        }
    };
    ($ctx:expr, ( $( $expr:expr ),* ) $( ; $($rest:tt)* )?) => {
        {
            $(
                $ctx.emit($expr)?;
            )*
            emit!($ctx, $( $($rest)* )?)
        }
    };
    ($ctx:expr, { $($body:tt)* } $($rest:tt)*) => {
        {
            emit!($ctx, $($body)*)?;
            emit!($ctx, $($rest)*)
        }
    };
}

pub(crate) use emit;
