#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    LogIn,
    CreateAccount,
    Quit,
}

impl MainChoice {
    pub const MENU: &'static str = "1. Log In\n2. Create Account\n3. Quit";

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::LogIn),
            "2" => Some(Self::CreateAccount),
            "3" => Some(Self::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChoice {
    History,
    Withdraw,
    Deposit,
    Transfer,
    Balance,
    ChangePin,
    LogOut,
}

impl SessionChoice {
    pub const MENU: &'static str = "1. Transaction History\n2. Withdraw\n3. Deposit\n4. Transfer\n5. Check Balance\n6. Change PIN\n7. Log Out";

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::History),
            "2" => Some(Self::Withdraw),
            "3" => Some(Self::Deposit),
            "4" => Some(Self::Transfer),
            "5" => Some(Self::Balance),
            "6" => Some(Self::ChangePin),
            "7" => Some(Self::LogOut),
            _ => None,
        }
    }
}
