//! GraphQL documents used by the integration suites.
//!
//! Kept in one place so the request shapes the client sends stay visible
//! next to each other, the way a frontend's operations file would look.

/// Register a new account.
pub const CREATE_USER: &str = r"
mutation CreateUser($user: UserInput!) {
  createUser(user: $user) {
    id
    firstName
    lastName
    email
    createdAt
  }
}";

/// Exchange credentials for a bearer token.
pub const LOGIN: &str = r"
mutation Login($email: String!, $password: String!) {
  login(email: $email, password: $password) {
    accessToken
  }
}";

/// The authenticated user.
pub const ME: &str = r"
query Me {
  me {
    id
    firstName
    lastName
    email
  }
}";

/// Create a path together with its initial character.
pub const CREATE_PATH: &str = r"
mutation CreatePath($path: PathInput!, $character: CreateCharacterInput!) {
  createPath(path: $path, character: $character) {
    id
    name
    createdAt
  }
}";

/// Every path.
pub const PATHS: &str = r"
query Paths {
  paths {
    id
    name
  }
}";

/// Look a path up by name.
pub const GET_PATH_BY_NAME: &str = r"
query GetPathByName($name: String!) {
  getPathByName(name: $name) {
    id
    name
  }
}";

/// The authenticated user's joined paths.
pub const MY_PATHS: &str = r"
query MyPaths {
  myPaths {
    id
    name
  }
}";

/// Join a single path.
pub const JOIN_PATH: &str = r"
mutation JoinPath($pathId: UUID!) {
  joinPath(pathId: $pathId)
}";

/// Join many paths at once.
pub const JOIN_PATHS: &str = r"
mutation JoinPaths($paths: [UUID!]!) {
  joinPaths(paths: $paths)
}";

/// Every module.
pub const MODULES: &str = r"
query Modules {
  modules {
    id
    title
    content
    pathId
  }
}";

/// The modules of one path.
pub const PATH_MODULES: &str = r"
query PathModules($pathId: UUID!) {
  pathModules(pathId: $pathId) {
    id
    title
    content
    pathId
  }
}";

/// Create a module.
pub const CREATE_MODULE: &str = r"
mutation CreateModule($module: CreateModuleInput!) {
  createModule(module: $module) {
    id
    title
    content
    pathId
  }
}";

/// Apply a partial update to a module.
pub const UPDATE_MODULE: &str = r"
mutation UpdateModule($update: UpdateModuleInput!) {
  updateModule(update: $update) {
    id
    title
    content
  }
}";

/// Delete a module.
pub const DELETE_MODULE: &str = r"
mutation DeleteModule($moduleId: UUID!) {
  deleteModule(moduleId: $moduleId)
}";

/// Record a module completion.
pub const COMPLETE_MODULE: &str = r"
mutation CompleteModule($moduleId: UUID!) {
  completeModule(moduleId: $moduleId)
}";

/// Request a friendship.
pub const CREATE_FRIENDSHIP: &str = r"
mutation CreateFriendship($friendInput: CreateFriendInput!) {
  createFriendship(friendInput: $friendInput) {
    id
    user1Id
    user2Id
    status
  }
}";

/// Answer a pending friend request.
pub const RESPOND_TO_FRIEND_REQUEST: &str = r"
mutation RespondToFriendRequest($user1Id: UUID!, $user2Id: UUID!, $response: String!) {
  respondToFriendRequest(user1Id: $user1Id, user2Id: $user2Id, response: $response) {
    id
    user1Id
    user2Id
    status
  }
}";

/// Every friendship involving a user.
pub const GET_USER_FRIENDS: &str = r"
query GetUserFriends($userId: UUID!) {
  getUserFriends(userId: $userId) {
    id
    user1Id
    user2Id
    status
  }
}";

/// Delete a friendship record.
pub const DELETE_FRIENDSHIP: &str = r"
mutation DeleteFriendship($friendId: UUID!) {
  deleteFriendship(friendId: $friendId)
}";

/// The authenticated user's characters.
pub const CHARACTERS: &str = r"
query Characters {
  characters {
    id
    index
    name
  }
}";

/// The character in one slot.
pub const GET_CHARACTER: &str = r"
query GetCharacter($index: Int!) {
  getCharacter(index: $index) {
    id
    index
    name
  }
}";

/// Create a character.
pub const CREATE_CHARACTER: &str = r"
mutation CreateCharacter($character: CreateCharacterInput!) {
  createCharacter(character: $character) {
    id
    index
    name
  }
}";

/// Apply a partial update to the character in one slot.
pub const UPDATE_CHARACTER: &str = r"
mutation UpdateCharacter($index: Int!, $update: UpdateCharacterInput!) {
  updateCharacter(index: $index, update: $update)
}";

/// Every concept.
pub const CONCEPTS: &str = r"
query Concepts {
  concepts {
    id
    name
    description
  }
}";

/// The authenticated user's learned concepts.
pub const MY_CONCEPTS: &str = r"
query MyConcepts {
  myConcepts {
    id
    name
  }
}";

/// Add a concept to the catalogue.
pub const CREATE_CONCEPT: &str = r"
mutation CreateConcept($concept: ConceptInput!) {
  createConcept(concept: $concept) {
    id
    name
    description
  }
}";

/// Mark a concept learned.
pub const LEARN_CONCEPT: &str = r"
mutation LearnConcept($conceptId: UUID!) {
  learnConcept(conceptId: $conceptId)
}";

/// The authenticated user's preferences.
pub const MY_PREFERENCES: &str = r"
query MyPreferences {
  myPreferences {
    reminderEmails
    publicProfile
  }
}";

/// Apply a partial update to the authenticated user's preferences.
pub const UPDATE_PREFERENCES: &str = r"
mutation UpdatePreferences($preferences: UserPreferencesInput!) {
  updatePreferences(preferences: $preferences) {
    reminderEmails
    publicProfile
  }
}";
